use crate::tree::{descendants, DocumentTree};

/// First element under the container, in document order, that overflows by more than
/// `min_overflow`; the container itself when no descendant does but it qualifies.
pub fn locate_scrollable<T: DocumentTree>(tree: &T, min_overflow: u64) -> Option<T::Handle> {
    let container = tree.container()?;
    let overflows = |node: T::Handle| tree.scroll_metrics(node).overflow() > min_overflow;
    descendants(tree, container)
        .into_iter()
        .find(|&node| overflows(node))
        .or_else(|| overflows(container).then_some(container))
}
