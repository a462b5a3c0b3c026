use list_filter_engine::{locate_scrollable, DocumentTree, HtmlTree, ScrollMetrics};

const PAGE: &str = r#"<div role="main">
    <div class="header" data-scroll-height="30" data-client-height="20"></div>
    <div class="list"><div class="row">one</div></div>
</div>"#;

#[test]
fn first_descendant_overflowing_enough_wins() {
    let mut tree = HtmlTree::parse(PAGE);
    assert_eq!(locate_scrollable(&tree, 20), None);

    let list = tree.select_first("div.list").expect("list present");
    tree.set_metrics(list, ScrollMetrics::new(1200, 400));
    assert_eq!(locate_scrollable(&tree, 20), Some(list));
    assert_eq!(tree.scroll_metrics(list).overflow(), 800);
}

#[test]
fn shallow_overflow_below_threshold_is_ignored() {
    let tree = HtmlTree::parse(PAGE);
    let header = tree.select_first("div.header").expect("header present");
    assert_eq!(locate_scrollable(&tree, 5), Some(header));
    assert_eq!(locate_scrollable(&tree, 10), None);
}

#[test]
fn container_is_the_fallback() {
    let mut tree = HtmlTree::parse(PAGE);
    let container = tree.container().expect("container present");
    tree.set_metrics(container, ScrollMetrics::new(2000, 500));
    assert_eq!(locate_scrollable(&tree, 20), Some(container));
}
