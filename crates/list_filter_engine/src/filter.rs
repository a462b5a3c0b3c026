use std::collections::HashMap;

use filter_logging::filter_debug;
use list_filter_core::{matches, ParsedQuery};

use crate::extract::RecordExtractor;
use crate::tree::DocumentTree;

/// Visibility counts after one filter pass, per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOutcome {
    pub shown: usize,
    pub hidden: usize,
}

/// Extract the current records, reveal all of them, then hide every boundary on which
/// `query` rejects all records. A boundary shared by several records stays visible when
/// any one of them matches.
pub fn apply_filter<T: DocumentTree>(
    tree: &mut T,
    extractor: &RecordExtractor,
    query: &ParsedQuery,
) -> FilterOutcome {
    let records = extractor.extract(&*tree);
    let mut visible: HashMap<T::Handle, bool> = HashMap::with_capacity(records.len());
    for record in &records {
        tree.set_hidden(record.element, false);
        *visible.entry(record.element).or_default() |= matches(record, query);
    }

    let mut outcome = FilterOutcome::default();
    for record in &records {
        if visible.get(&record.element).copied().unwrap_or(true) {
            outcome.shown += 1;
        } else {
            outcome.hidden += 1;
        }
    }
    for (&element, &shown) in &visible {
        if !shown {
            tree.set_hidden(element, true);
        }
    }
    filter_debug!(
        "Filter pass: include={} exclude={} shown={} hidden={}",
        query.include_terms().len(),
        query.exclude_terms().len(),
        outcome.shown,
        outcome.hidden
    );
    outcome
}
