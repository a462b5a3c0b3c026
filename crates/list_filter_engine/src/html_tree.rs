//! HTML-backed [`DocumentTree`] for snapshots, tests and the CLI host.
//!
//! A static snapshot has no layout, so scroll measurements come from
//! `data-scroll-height` / `data-client-height` attributes or explicit overrides.
//! An element marked `data-virtual-list` simulates lazy loading: only its first
//! page of children is materialized, and every scroll to its end materializes
//! the next page and records a mutation batch.

use std::collections::{HashMap, HashSet};

use ego_tree::NodeId;
use scraper::node::Node;
use scraper::{Html, Selector};

use crate::tree::{ChildNode, DocumentTree, MutationBatch, ScrollMetrics};

pub const DEFAULT_CONTAINER_SELECTOR: &str = r#"div[role="main"]"#;
const VIRTUAL_LIST_ATTR: &str = "data-virtual-list";
const SCROLL_HEIGHT_ATTR: &str = "data-scroll-height";
const CLIENT_HEIGHT_ATTR: &str = "data-client-height";
const TEXT_INPUT_TYPES: &[&str] = &["text", "search", ""];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingOptions {
    /// Entries materialized initially and per scroll.
    pub page_size: usize,
    /// Layout height of one entry.
    pub entry_extent: u64,
    /// Visible height of the list viewport.
    pub viewport_extent: u64,
}

impl Default for PagingOptions {
    fn default() -> Self {
        Self {
            page_size: 10,
            entry_extent: 80,
            viewport_extent: 400,
        }
    }
}

#[derive(Debug)]
struct VirtualList {
    list: NodeId,
    options: PagingOptions,
    materialized: usize,
    pending: Vec<NodeId>,
}

pub struct HtmlTree {
    document: Html,
    container_selector: Option<Selector>,
    location: String,
    hidden: HashSet<NodeId>,
    field_values: HashMap<NodeId, String>,
    metrics: HashMap<NodeId, ScrollMetrics>,
    unmaterialized: HashSet<NodeId>,
    virtual_list: Option<VirtualList>,
    paging: Option<PagingOptions>,
    mutations: Vec<MutationBatch>,
}

impl HtmlTree {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
            container_selector: Selector::parse(DEFAULT_CONTAINER_SELECTOR).ok(),
            location: String::new(),
            hidden: HashSet::new(),
            field_values: HashMap::new(),
            metrics: HashMap::new(),
            unmaterialized: HashSet::new(),
            virtual_list: None,
            paging: None,
            mutations: Vec::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Uses a different CSS selector to find the container. An invalid selector
    /// leaves the tree without a container.
    pub fn with_container_selector(mut self, selector: &str) -> Self {
        self.container_selector = Selector::parse(selector).ok();
        self
    }

    /// Activates lazy loading on the `data-virtual-list` element, if any.
    pub fn with_paging(mut self, options: PagingOptions) -> Self {
        self.paging = Some(options);
        self.install_virtual_list();
        self
    }

    /// Simulates navigation: the page is replaced by `html` at `location`.
    /// Records one mutation batch covering the swapped entries.
    pub fn navigate(&mut self, location: impl Into<String>, html: &str) {
        let removed = self.materialized_entry_count();
        self.document = Html::parse_document(html);
        self.location = location.into();
        self.hidden.clear();
        self.field_values.clear();
        self.metrics.clear();
        self.unmaterialized.clear();
        self.virtual_list = None;
        self.install_virtual_list();
        let added = self.materialized_entry_count();
        self.mutations.push(MutationBatch { added, removed });
    }

    /// Changes the location without touching the document.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn set_field_value(&mut self, node: NodeId, value: impl Into<String>) {
        self.field_values.insert(node, value.into());
    }

    pub fn set_metrics(&mut self, node: NodeId, metrics: ScrollMetrics) {
        self.metrics.insert(node, metrics);
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.hidden.contains(&node)
    }

    /// First materialized element matching `selector`.
    pub fn select_first(&self, selector: &str) -> Option<NodeId> {
        self.select_all(selector).into_iter().next()
    }

    /// Materialized elements matching `selector`, in document order.
    pub fn select_all(&self, selector: &str) -> Vec<NodeId> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.document
            .select(&selector)
            .map(|element| element.id())
            .filter(|&id| self.is_materialized(id))
            .collect()
    }

    /// Entries of the virtual list still waiting to be loaded.
    pub fn pending_entries(&self) -> usize {
        self.virtual_list
            .as_ref()
            .map(|list| list.pending.len())
            .unwrap_or(0)
    }

    fn install_virtual_list(&mut self) {
        let Some(options) = self.paging else {
            return;
        };
        let Ok(selector) = Selector::parse(&format!("[{VIRTUAL_LIST_ATTR}]")) else {
            return;
        };
        let Some(list) = self.document.select(&selector).next().map(|e| e.id()) else {
            return;
        };
        let entries: Vec<NodeId> = self
            .document
            .tree
            .get(list)
            .map(|node| {
                node.children()
                    .filter(|child| child.value().is_element())
                    .map(|child| child.id())
                    .collect()
            })
            .unwrap_or_default();

        let visible = entries.len().min(options.page_size);
        let pending: Vec<NodeId> = entries[visible..].to_vec();
        self.unmaterialized.extend(pending.iter().copied());
        self.virtual_list = Some(VirtualList {
            list,
            options,
            materialized: visible,
            pending,
        });
    }

    fn materialized_entry_count(&self) -> usize {
        self.virtual_list
            .as_ref()
            .map(|list| list.materialized)
            .unwrap_or(0)
    }

    /// An element is materialized when neither it nor any ancestor is still pending.
    fn is_materialized(&self, id: NodeId) -> bool {
        let mut current = self.document.tree.get(id);
        while let Some(node) = current {
            if self.unmaterialized.contains(&node.id()) {
                return false;
            }
            current = node.parent();
        }
        true
    }

    fn element_attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.document
            .tree
            .get(node)?
            .value()
            .as_element()?
            .attr(name)
    }

    fn attr_metric(&self, node: NodeId, name: &str) -> Option<u64> {
        self.element_attr(node, name)?.trim().parse().ok()
    }
}

impl DocumentTree for HtmlTree {
    type Handle = NodeId;

    fn container(&self) -> Option<NodeId> {
        let selector = self.container_selector.as_ref()?;
        self.document.select(selector).next().map(|e| e.id())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.document.tree.get(node)?.parent()?;
        parent.value().is_element().then(|| parent.id())
    }

    fn child_nodes(&self, node: NodeId) -> Vec<ChildNode<NodeId>> {
        let Some(node) = self.document.tree.get(node) else {
            return Vec::new();
        };
        node.children()
            .filter_map(|child| match child.value() {
                Node::Element(_) if !self.unmaterialized.contains(&child.id()) => {
                    Some(ChildNode::Element(child.id()))
                }
                Node::Text(text) => Some(ChildNode::Text(String::from(&**text))),
                _ => None,
            })
            .collect()
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.document
            .tree
            .get(node)
            .and_then(|n| n.value().as_element().map(|e| e.name().to_ascii_lowercase()))
            .unwrap_or_default()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.element_attr(node, name).map(str::to_owned)
    }

    fn field_value(&self, node: NodeId) -> Option<String> {
        if let Some(value) = self.field_values.get(&node) {
            return Some(value.clone());
        }
        match self.tag_name(node).as_str() {
            "textarea" => {
                let element = self.document.tree.get(node)?;
                let text: String = element
                    .descendants()
                    .filter_map(|n| n.value().as_text().map(|t| String::from(&**t)))
                    .collect();
                Some(text)
            }
            "input" => {
                let kind = self.element_attr(node, "type").unwrap_or("").to_ascii_lowercase();
                if TEXT_INPUT_TYPES.contains(&kind.as_str()) {
                    self.element_attr(node, "value").map(str::to_owned)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn scroll_metrics(&self, node: NodeId) -> ScrollMetrics {
        if let Some(list) = self.virtual_list.as_ref().filter(|list| list.list == node) {
            return ScrollMetrics::new(
                list.materialized as u64 * list.options.entry_extent,
                list.options.viewport_extent,
            );
        }
        if let Some(metrics) = self.metrics.get(&node) {
            return *metrics;
        }
        ScrollMetrics::new(
            self.attr_metric(node, SCROLL_HEIGHT_ATTR).unwrap_or(0),
            self.attr_metric(node, CLIENT_HEIGHT_ATTR).unwrap_or(0),
        )
    }

    fn scroll_to_end(&mut self, node: NodeId) {
        let Some(list) = self.virtual_list.as_mut().filter(|list| list.list == node) else {
            return;
        };
        if list.pending.is_empty() {
            return;
        }
        let take = list.options.page_size.min(list.pending.len());
        let loaded: Vec<NodeId> = list.pending.drain(..take).collect();
        list.materialized += loaded.len();
        for id in &loaded {
            self.unmaterialized.remove(id);
        }
        self.mutations.push(MutationBatch {
            added: loaded.len(),
            removed: 0,
        });
    }

    fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if hidden {
            self.hidden.insert(node);
        } else {
            self.hidden.remove(&node);
        }
    }

    fn take_mutations(&mut self) -> Vec<MutationBatch> {
        std::mem::take(&mut self.mutations)
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{HtmlTree, PagingOptions};
    use crate::tree::{descendants, text_content, DocumentTree, MutationBatch};

    const LIST: &str = r#"<div role="main"><div data-virtual-list="1">
        <div>one</div><div>two</div><div>three</div><div>four</div><div>five</div>
    </div></div>"#;

    fn paged(page_size: usize) -> HtmlTree {
        HtmlTree::parse(LIST).with_paging(PagingOptions {
            page_size,
            entry_extent: 50,
            viewport_extent: 60,
        })
    }

    #[test]
    fn only_first_page_is_visible() {
        let tree = paged(2);
        let container = tree.container().unwrap();
        assert_eq!(text_content(&tree, container, " "), "one two");
        assert_eq!(tree.pending_entries(), 3);
    }

    #[test]
    fn scrolling_materializes_next_page_and_records_batch() {
        let mut tree = paged(2);
        let list = tree.select_first("[data-virtual-list]").unwrap();
        assert_eq!(tree.scroll_metrics(list).scroll_extent, 100);

        tree.scroll_to_end(list);
        assert_eq!(tree.scroll_metrics(list).scroll_extent, 200);
        assert_eq!(
            tree.take_mutations(),
            vec![MutationBatch {
                added: 2,
                removed: 0
            }]
        );

        tree.scroll_to_end(list);
        tree.scroll_to_end(list);
        assert_eq!(tree.pending_entries(), 0);
        assert_eq!(tree.scroll_metrics(list).scroll_extent, 250);
        assert_eq!(tree.take_mutations().len(), 1);
    }

    #[test]
    fn pending_entries_are_not_selectable() {
        let tree = paged(1);
        let container = tree.container().unwrap();
        assert_eq!(tree.select_all("[data-virtual-list] > div").len(), 1);
        assert_eq!(descendants(&tree, container).len(), 2);
    }

    #[test]
    fn field_values_prefer_live_override() {
        let mut tree = HtmlTree::parse(
            r#"<div role="main"><textarea>draft</textarea><input value="typed"><input type="checkbox" value="on"></div>"#,
        );
        let textarea = tree.select_first("textarea").unwrap();
        let inputs = tree.select_all("input");
        assert_eq!(tree.field_value(textarea).as_deref(), Some("draft"));
        assert_eq!(tree.field_value(inputs[0]).as_deref(), Some("typed"));
        assert_eq!(tree.field_value(inputs[1]), None);

        tree.set_field_value(textarea, "edited");
        assert_eq!(tree.field_value(textarea).as_deref(), Some("edited"));
    }

    #[test]
    fn navigation_swaps_document_and_reports_mutation() {
        let mut tree = paged(2).with_location("https://maps.example/list/a");
        tree.navigate("https://maps.example/list/b", LIST);
        assert_eq!(tree.location(), "https://maps.example/list/b");
        assert_eq!(
            tree.take_mutations(),
            vec![MutationBatch {
                added: 2,
                removed: 2
            }]
        );
    }
}
