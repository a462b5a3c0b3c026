use crate::normalize::normalize;
use crate::{ParsedQuery, Record};

/// Decides whether a record stays visible under `query`.
///
/// Include terms are matched as one joined phrase; any exclude term rejects.
pub fn matches<H>(record: &Record<H>, query: &ParsedQuery) -> bool {
    let haystack = normalize(&record.aggregated_text);

    if let Some(phrase) = query.include_phrase() {
        if !haystack.contains(&phrase) {
            return false;
        }
    }

    !query
        .exclude_terms()
        .iter()
        .any(|term| haystack.contains(&normalize(term)))
}
