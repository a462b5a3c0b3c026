use std::fmt::Write as _;

use list_filter_engine::{HtmlTree, RecordExtractor, SessionRunner};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub name: String,
    pub category_price: String,
    pub note: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub generated_at: String,
    pub snapshot: String,
    pub encoding: String,
    pub query: String,
    pub settled: bool,
    pub elapsed_ms: u64,
    pub loads_completed: u32,
    pub loads_abandoned: u32,
    pub filter_passes: u32,
    pub shown: usize,
    pub hidden: usize,
    pub entries: Vec<EntryReport>,
}

/// Report fields that do not come from the session itself.
pub struct RunContext<'a> {
    pub snapshot: &'a str,
    pub query: &'a str,
    pub encoding: &'a str,
    pub settled: bool,
}

impl Report {
    pub fn collect(runner: &SessionRunner<HtmlTree>, context: RunContext<'_>) -> Self {
        let tree = runner.tree();
        let entries: Vec<EntryReport> = RecordExtractor::new()
            .extract(tree)
            .into_iter()
            .map(|record| EntryReport {
                visible: !tree.is_hidden(record.element),
                name: record.name,
                category_price: record.category_price,
                note: record.note,
            })
            .collect();
        let shown = entries.iter().filter(|entry| entry.visible).count();
        let stats = runner.stats();

        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            snapshot: context.snapshot.to_string(),
            encoding: context.encoding.to_string(),
            query: context.query.to_string(),
            settled: context.settled,
            elapsed_ms: u64::try_from(runner.now().as_millis()).unwrap_or(u64::MAX),
            loads_completed: stats.loads_completed,
            loads_abandoned: stats.loads_abandoned,
            filter_passes: stats.filter_passes,
            hidden: entries.len() - shown,
            shown,
            entries,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} entries, {} shown, {} hidden (query: {:?})",
            self.entries.len(),
            self.shown,
            self.hidden,
            self.query
        );
        for entry in self.entries.iter().filter(|entry| entry.visible) {
            let _ = write!(out, "  {}", entry.name);
            if !entry.category_price.is_empty() {
                let _ = write!(out, " | {}", entry.category_price);
            }
            if !entry.note.is_empty() {
                let _ = write!(out, " | note: {}", entry.note);
            }
            out.push('\n');
        }
        if !self.settled {
            out.push_str("warning: loading did not settle; the list may be incomplete\n");
        }
        out
    }
}
