//! Heuristic record extraction from an unstructured list.
//!
//! - candidates: interactive elements satisfying two of three structural hints
//!   (image-like child, heading-like child, more than two wrapper elements)
//! - boundary: nearest `div` ancestor below the container, used for visibility;
//!   several records may share one
//! - fields: heading text as name, the rest as category/price, a nearby note
//! - aggregated text: everything a user could search for, folded for matching

use list_filter_core::{collapse_whitespace, fold_for_matching, ListFingerprint, Record};

use crate::tree::{contains, descendants, has_class, text_content, DocumentTree};

const INTERACTIVE_TAGS: &[&str] = &["button"];
const IMAGE_TAGS: &[&str] = &["img", "picture", "svg"];
const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4"];
const HEADING_CLASSES: &[&str] = &["fontHeadlineSmall"];
const WRAPPER_TAGS: &[&str] = &["div", "span"];
const BOUNDARY_TAG: &str = "div";
const LABEL_ATTRS: &[&str] = &["alt", "aria-label", "title", "placeholder"];
const NOTE_CLASS_MARKER: &str = "note";
const SEGMENT_BULLET: char = '·';
/// Joins text pieces so that element boundaries survive as split points.
const PIECE_SEPARATOR: &str = "  ";
const MIN_NAME_CHARS: usize = 3;
const MIN_WRAPPERS: usize = 3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecordExtractor;

impl RecordExtractor {
    pub fn new() -> Self {
        Self
    }

    /// One extraction pass over the current container. Absent container yields nothing.
    pub fn extract<T: DocumentTree>(&self, tree: &T) -> Vec<Record<T::Handle>> {
        self.extract_counted(tree).0
    }

    /// Fingerprint of the list as it is right now.
    pub fn fingerprint<T: DocumentTree>(&self, tree: &T) -> ListFingerprint {
        let (records, candidates) = self.extract_counted(tree);
        ListFingerprint::from_names(records.iter().map(|r| r.name.as_str()), candidates)
    }

    /// Entries currently present, counted without building records.
    pub fn candidate_count<T: DocumentTree>(&self, tree: &T) -> usize {
        tree.container()
            .map(|container| candidates(tree, container).len())
            .unwrap_or(0)
    }

    fn extract_counted<T: DocumentTree>(&self, tree: &T) -> (Vec<Record<T::Handle>>, usize) {
        let Some(container) = tree.container() else {
            return (Vec::new(), 0);
        };

        let candidates = candidates(tree, container);
        let records = candidates
            .iter()
            .filter_map(|&candidate| {
                resolve_boundary(tree, container, candidate)
                    .map(|boundary| build_record(tree, candidate, boundary))
            })
            .collect();
        (records, candidates.len())
    }
}

fn candidates<T: DocumentTree>(tree: &T, container: T::Handle) -> Vec<T::Handle> {
    descendants(tree, container)
        .into_iter()
        .filter(|&node| is_candidate(tree, node))
        .collect()
}

fn is_interactive<T: DocumentTree>(tree: &T, node: T::Handle) -> bool {
    INTERACTIVE_TAGS.contains(&tree.tag_name(node).as_str())
        || tree.attr(node, "role").as_deref() == Some("button")
}

fn is_image_like<T: DocumentTree>(tree: &T, node: T::Handle) -> bool {
    IMAGE_TAGS.contains(&tree.tag_name(node).as_str())
        || tree.attr(node, "role").as_deref() == Some("img")
}

fn is_heading_like<T: DocumentTree>(tree: &T, node: T::Handle) -> bool {
    HEADING_TAGS.contains(&tree.tag_name(node).as_str())
        || HEADING_CLASSES.iter().any(|class| has_class(tree, node, class))
}

fn is_editable<T: DocumentTree>(tree: &T, node: T::Handle) -> bool {
    match tree.tag_name(node).as_str() {
        "textarea" | "input" => tree.field_value(node).is_some(),
        _ => tree
            .attr(node, "contenteditable")
            .is_some_and(|value| value.is_empty() || value.eq_ignore_ascii_case("true")),
    }
}

fn is_note_like<T: DocumentTree>(tree: &T, node: T::Handle) -> bool {
    tree.attr(node, "class").is_some_and(|value| {
        value
            .split_whitespace()
            .any(|token| token.to_ascii_lowercase().contains(NOTE_CLASS_MARKER))
    })
}

fn is_candidate<T: DocumentTree>(tree: &T, node: T::Handle) -> bool {
    if !is_interactive(tree, node) {
        return false;
    }
    let inner = descendants(tree, node);
    let has_image = inner.iter().any(|&n| is_image_like(tree, n));
    let has_heading = inner.iter().any(|&n| is_heading_like(tree, n));
    let wrappers = inner
        .iter()
        .filter(|&&n| WRAPPER_TAGS.contains(&tree.tag_name(n).as_str()))
        .count();
    [has_image, has_heading, wrappers >= MIN_WRAPPERS]
        .into_iter()
        .filter(|&hint| hint)
        .count()
        >= 2
}

/// Nearest boundary-tag ancestor strictly below the container.
fn resolve_boundary<T: DocumentTree>(
    tree: &T,
    container: T::Handle,
    candidate: T::Handle,
) -> Option<T::Handle> {
    let mut current = tree.parent(candidate);
    while let Some(node) = current {
        if node == container {
            return None;
        }
        if tree.tag_name(node) == BOUNDARY_TAG {
            return Some(node);
        }
        current = tree.parent(node);
    }
    None
}

fn build_record<T: DocumentTree>(
    tree: &T,
    candidate: T::Handle,
    boundary: T::Handle,
) -> Record<T::Handle> {
    let raw_text = text_content(tree, candidate, PIECE_SEPARATOR).to_lowercase();
    let (name, category_price) = split_fields(tree, candidate, &raw_text);
    let note = locate_note(tree, candidate, boundary);

    let mut parts = vec![text_content(tree, boundary, " ")];
    for node in std::iter::once(boundary).chain(descendants(tree, boundary)) {
        parts.extend(LABEL_ATTRS.iter().filter_map(|attr| tree.attr(node, attr)));
        if is_editable(tree, node) {
            parts.extend(tree.field_value(node));
        }
    }
    if let Some(note) = &note {
        if note.outside_boundary {
            parts.push(note.text.clone());
        }
    }

    Record {
        element: boundary,
        name,
        category_price,
        note: note.map(|n| n.text).unwrap_or_default(),
        aggregated_text: fold_for_matching(&parts.join(" ")),
    }
}

fn split_fields<T: DocumentTree>(tree: &T, candidate: T::Handle, raw_text: &str) -> (String, String) {
    let candidate_text = collapse_whitespace(raw_text);
    let heading_text = descendants(tree, candidate)
        .into_iter()
        .find(|&n| is_heading_like(tree, n))
        .map(|heading| collapse_whitespace(&text_content(tree, heading, " ").to_lowercase()))
        .filter(|text| !text.is_empty());

    let (mut name, mut category_price) = match heading_text {
        Some(name) => {
            let rest = remove_first(&candidate_text, &name);
            (name, rest)
        }
        None => (String::new(), candidate_text),
    };

    if name.chars().count() < MIN_NAME_CHARS && !category_price.is_empty() {
        let segments = segments(raw_text);
        let promoted = segments
            .iter()
            .find(|segment| is_name_like(segment))
            .or_else(|| {
                segments
                    .first()
                    .filter(|segment| segment.chars().count() >= MIN_NAME_CHARS && has_letter(segment))
            });
        if let Some(promoted) = promoted {
            category_price = remove_first(&category_price, promoted);
            name = promoted.clone();
        }
    }

    let category_price = category_price
        .trim_start_matches(|c: char| !c.is_alphanumeric() && c != '$')
        .trim()
        .to_string();
    (name, category_price)
}

/// Splits on the middle-dot bullet and on runs of two or more whitespace characters.
fn segments(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    for chunk in raw.split(SEGMENT_BULLET) {
        let mut current = String::new();
        let mut blanks = String::new();
        for c in chunk.chars() {
            if c.is_whitespace() {
                blanks.push(c);
                continue;
            }
            if blanks.chars().count() >= 2 {
                out.push(std::mem::take(&mut current));
            } else if !blanks.is_empty() {
                current.push(' ');
            }
            blanks.clear();
            current.push(c);
        }
        out.push(current);
    }
    out.into_iter()
        .map(|segment| segment.trim().to_string())
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn has_letter(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

fn starts_like_price(text: &str) -> bool {
    text.strip_prefix('$')
        .unwrap_or(text)
        .starts_with(|c: char| c.is_ascii_digit())
}

fn is_name_like(segment: &str) -> bool {
    segment.chars().count() >= MIN_NAME_CHARS && has_letter(segment) && !starts_like_price(segment)
}

fn remove_first(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    collapse_whitespace(&haystack.replacen(needle, "", 1))
}

struct LocatedNote {
    text: String,
    outside_boundary: bool,
}

/// Next sibling of the boundary when it looks like a note, else a note-like element
/// or editable field inside the boundary but outside the candidate.
fn locate_note<T: DocumentTree>(
    tree: &T,
    candidate: T::Handle,
    boundary: T::Handle,
) -> Option<LocatedNote> {
    if let Some(next) = tree.next_sibling_element(boundary) {
        let subtree: Vec<_> = std::iter::once(next).chain(descendants(tree, next)).collect();
        let holds_entry = subtree.iter().any(|&n| is_interactive(tree, n));
        let looks_like_note = is_note_like(tree, next) || subtree.iter().any(|&n| is_editable(tree, n));
        if looks_like_note && !holds_entry {
            return note_text(tree, next).map(|text| LocatedNote {
                text,
                outside_boundary: true,
            });
        }
    }

    descendants(tree, boundary)
        .into_iter()
        .filter(|&n| !contains(tree, candidate, n))
        .find(|&n| is_note_like(tree, n) || is_editable(tree, n))
        .and_then(|holder| note_text(tree, holder))
        .map(|text| LocatedNote {
            text,
            outside_boundary: false,
        })
}

/// Editable value wins over surrounding text inside a note container.
fn note_text<T: DocumentTree>(tree: &T, holder: T::Handle) -> Option<String> {
    let field_value = std::iter::once(holder)
        .chain(descendants(tree, holder))
        .filter(|&n| is_editable(tree, n))
        .filter_map(|n| tree.field_value(n))
        .map(|value| collapse_whitespace(&value.to_lowercase()))
        .find(|value| !value.is_empty());
    let text = field_value
        .unwrap_or_else(|| collapse_whitespace(&text_content(tree, holder, " ").to_lowercase()));
    (!text.is_empty()).then_some(text)
}
