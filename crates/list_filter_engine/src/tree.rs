//! Capability interface over an externally-owned document tree.
//!
//! The engine never owns the tree it filters. It reads structure, text and scroll
//! measurements through [`DocumentTree`] and writes back exactly two things: the
//! hidden flag of boundary elements and the scroll position of the list.

use std::fmt;
use std::hash::Hash;

/// Child of an element, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildNode<H> {
    Element(H),
    Text(String),
}

/// Scroll measurements of one element, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub scroll_extent: u64,
    pub visible_extent: u64,
}

impl ScrollMetrics {
    pub fn new(scroll_extent: u64, visible_extent: u64) -> Self {
        Self {
            scroll_extent,
            visible_extent,
        }
    }

    /// How far the content extends past the visible area.
    pub fn overflow(&self) -> u64 {
        self.scroll_extent.saturating_sub(self.visible_extent)
    }
}

/// Node counts of one batch of structural changes under the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutationBatch {
    pub added: usize,
    pub removed: usize,
}

pub trait DocumentTree {
    /// Non-owning element reference. Only valid while the element stays in the tree.
    type Handle: Copy + Eq + Hash + fmt::Debug;

    /// Root element hosting the list, if it is currently present.
    fn container(&self) -> Option<Self::Handle>;

    fn parent(&self, node: Self::Handle) -> Option<Self::Handle>;

    fn child_nodes(&self, node: Self::Handle) -> Vec<ChildNode<Self::Handle>>;

    /// Lower-case tag name.
    fn tag_name(&self, node: Self::Handle) -> String;

    fn attr(&self, node: Self::Handle, name: &str) -> Option<String>;

    /// Current value of an editable field, which may differ from its markup.
    fn field_value(&self, node: Self::Handle) -> Option<String>;

    fn scroll_metrics(&self, node: Self::Handle) -> ScrollMetrics;

    fn scroll_to_end(&mut self, node: Self::Handle);

    fn set_hidden(&mut self, node: Self::Handle, hidden: bool);

    /// Mutation batches observed since the last call.
    fn take_mutations(&mut self) -> Vec<MutationBatch>;

    /// Current location (address) of the hosting page.
    fn location(&self) -> String;

    fn next_sibling_element(&self, node: Self::Handle) -> Option<Self::Handle> {
        let parent = self.parent(node)?;
        let siblings = children(self, parent);
        let position = siblings.iter().position(|&sibling| sibling == node)?;
        siblings.get(position + 1).copied()
    }
}

/// Element children of `node`.
pub fn children<T: DocumentTree + ?Sized>(tree: &T, node: T::Handle) -> Vec<T::Handle> {
    tree.child_nodes(node)
        .into_iter()
        .filter_map(|child| match child {
            ChildNode::Element(handle) => Some(handle),
            ChildNode::Text(_) => None,
        })
        .collect()
}

/// Element descendants of `node` in pre-order, excluding `node` itself.
pub fn descendants<T: DocumentTree + ?Sized>(tree: &T, node: T::Handle) -> Vec<T::Handle> {
    let mut out = Vec::new();
    let mut stack: Vec<T::Handle> = children(tree, node).into_iter().rev().collect();
    while let Some(next) = stack.pop() {
        out.push(next);
        stack.extend(children(tree, next).into_iter().rev());
    }
    out
}

/// True when `node` is `ancestor` or lies below it.
pub fn contains<T: DocumentTree + ?Sized>(tree: &T, ancestor: T::Handle, node: T::Handle) -> bool {
    let mut current = Some(node);
    while let Some(handle) = current {
        if handle == ancestor {
            return true;
        }
        current = tree.parent(handle);
    }
    false
}

pub fn has_class<T: DocumentTree + ?Sized>(tree: &T, node: T::Handle, class: &str) -> bool {
    tree.attr(node, "class")
        .is_some_and(|value| value.split_whitespace().any(|token| token == class))
}

/// Elements whose text never reaches the user as ordinary content.
const SILENT_TAGS: &[&str] = &["script", "style", "template", "noscript", "textarea"];

/// Text of `node` and its descendants in document order, pieces joined by `separator`.
/// Field contents are excluded; read them through [`DocumentTree::field_value`].
pub fn text_content<T: DocumentTree + ?Sized>(tree: &T, node: T::Handle, separator: &str) -> String {
    let mut pieces = Vec::new();
    collect_text(tree, node, &mut pieces);
    pieces.join(separator)
}

fn collect_text<T: DocumentTree + ?Sized>(tree: &T, node: T::Handle, pieces: &mut Vec<String>) {
    for child in tree.child_nodes(node) {
        match child {
            ChildNode::Text(text) => {
                if !text.trim().is_empty() {
                    pieces.push(text);
                }
            }
            ChildNode::Element(element) => {
                if !SILENT_TAGS.contains(&tree.tag_name(element).as_str()) {
                    collect_text(tree, element, pieces);
                }
            }
        }
    }
}
