use list_filter_core::{fold_for_matching, ViewKind};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::extract::RecordExtractor;
use crate::tree::{text_content, DocumentTree};

/// Metadata line of a saved-list card, e.g. "private • 3 places".
static LIST_CARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[•·]\s*\d+\s+places?\b").expect("valid list card regex"));

/// Tells an overview of saved lists apart from a single list's detail view.
///
/// Any place entry in the container means detail. Without one, the location, an
/// overview heading or list-card metadata mark an overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewClassifier {
    pub overview_path_markers: Vec<String>,
    pub detail_path_markers: Vec<String>,
    pub overview_phrases: Vec<String>,
    extractor: RecordExtractor,
}

impl Default for ViewClassifier {
    fn default() -> Self {
        Self {
            overview_path_markers: vec!["/maps/saved".into()],
            detail_path_markers: vec!["/placelists/list/".into()],
            overview_phrases: vec!["lists you saved".into()],
            extractor: RecordExtractor::new(),
        }
    }
}

impl ViewClassifier {
    pub fn classify<T: DocumentTree>(&self, tree: &T) -> ViewKind {
        if self.has_place_content(tree) {
            return ViewKind::Detail;
        }
        if self.overview_by_location(&tree.location()) || self.has_overview_text(tree) {
            ViewKind::Overview
        } else {
            ViewKind::Detail
        }
    }

    /// At least one entry that qualifies as a place, not a list card.
    pub fn has_place_content<T: DocumentTree>(&self, tree: &T) -> bool {
        self.extractor.candidate_count(tree) > 0
    }

    fn overview_by_location(&self, location: &str) -> bool {
        let path = location_path(location);
        self.overview_path_markers.iter().any(|m| path.contains(m.as_str()))
            && !self.detail_path_markers.iter().any(|m| path.contains(m.as_str()))
    }

    fn has_overview_text<T: DocumentTree>(&self, tree: &T) -> bool {
        let Some(container) = tree.container() else {
            return false;
        };
        let text = fold_for_matching(&text_content(tree, container, " "));
        LIST_CARD.is_match(&text)
            || self
                .overview_phrases
                .iter()
                .any(|phrase| text.contains(&fold_for_matching(phrase)))
    }
}

/// Path of an absolute location; anything unparsable is matched as-is.
fn location_path(location: &str) -> String {
    match Url::parse(location) {
        Ok(url) => url.path().to_string(),
        Err(_) => location.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{location_path, LIST_CARD};

    #[test]
    fn path_is_taken_from_absolute_locations() {
        assert_eq!(location_path("https://maps.example.com/maps/saved?hl=en"), "/maps/saved");
        assert_eq!(location_path("/placelists/list/abc"), "/placelists/list/abc");
    }

    #[test]
    fn list_card_metadata_needs_a_bullet_and_a_place_count() {
        assert!(LIST_CARD.is_match("by mikhael andarias • 134 places"));
        assert!(LIST_CARD.is_match("private · 1 place"));
        assert!(!LIST_CARD.is_match("starred places"));
        assert!(!LIST_CARD.is_match("4.5 • 12 placeholders"));
    }
}
