use list_filter_core::parse;
use list_filter_engine::{apply_filter, DocumentTree, FilterOutcome, HtmlTree, RecordExtractor};
use pretty_assertions::assert_eq;

fn entry(name: &str, detail: &str, note: Option<&str>) -> String {
    let note = note
        .map(|text| format!(r#"<div class="note">{text}</div>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="entry"><button class="place"><img src="p.jpg" alt=""><div class="fontHeadlineSmall">{name}</div><span>{detail}</span></button>{note}</div>"#
    )
}

fn page(body: &str) -> HtmlTree {
    HtmlTree::parse(&format!(
        r#"<html><body><div role="main"><div class="list">{body}</div></div></body></html>"#
    ))
}

fn scenario() -> HtmlTree {
    page(&[
        entry("Coffee Supreme", "Cafe · $$", Some("cold brew")),
        entry("Page Turner Bookstore", "Used Bookstore · 4.8", None),
        entry("Central Park", "Park", None),
    ]
    .concat())
}

fn visible_names(tree: &HtmlTree) -> Vec<String> {
    RecordExtractor::new()
        .extract(tree)
        .into_iter()
        .filter(|record| !tree.is_hidden(record.element))
        .map(|record| record.name)
        .collect()
}

#[test]
fn scenario_entries_are_extracted_with_fields() {
    let tree = scenario();
    let records = RecordExtractor::new().extract(&tree);

    let fields: Vec<_> = records
        .iter()
        .map(|r| (r.name.as_str(), r.category_price.as_str(), r.note.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("coffee supreme", "cafe · $$", "cold brew"),
            ("page turner bookstore", "used bookstore · 4.8", ""),
            ("central park", "park", ""),
        ]
    );
    assert_eq!(records[0].aggregated_text, "coffee supreme cafe · $$ cold brew");
}

#[test]
fn scenario_queries_toggle_visibility() {
    let mut tree = scenario();
    let extractor = RecordExtractor::new();

    let outcome = apply_filter(&mut tree, &extractor, &parse("Bookstore -used"));
    assert_eq!(outcome, FilterOutcome { shown: 0, hidden: 3 });
    assert!(visible_names(&tree).is_empty());

    apply_filter(&mut tree, &extractor, &parse("-Coffee -Bookstore"));
    assert_eq!(visible_names(&tree), vec!["central park"]);

    let outcome = apply_filter(&mut tree, &extractor, &parse(""));
    assert_eq!(outcome.shown, 3);
    assert_eq!(visible_names(&tree).len(), 3);
}

#[test]
fn notes_are_searchable() {
    let mut tree = scenario();
    apply_filter(&mut tree, &RecordExtractor::new(), &parse("cold brew"));
    assert_eq!(visible_names(&tree), vec!["coffee supreme"]);
}

#[test]
fn note_editor_next_to_entry_contributes_its_live_value() {
    let body = format!(
        r#"{}<div class="note-editor"><textarea>Ask for oat milk</textarea></div>{}"#,
        entry("Green Bowl", "Salad · $$", None),
        entry("Noodle Bar", "Ramen · $", None),
    );
    let mut tree = page(&body);
    let extractor = RecordExtractor::new();

    let records = extractor.extract(&tree);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].note, "ask for oat milk");
    assert!(records[0].aggregated_text.ends_with("ask for oat milk"));
    assert_eq!(records[1].note, "");

    let textarea = tree.select_first("textarea").unwrap();
    tree.set_field_value(textarea, "Extra spicy");
    apply_filter(&mut tree, &extractor, &parse("spicy"));
    assert_eq!(visible_names(&tree), vec!["green bowl"]);
}

#[test]
fn entries_without_heading_fall_back_to_segment_naming() {
    let tree = page(
        r#"<div><button><img alt=""><span>4.5</span><span>Golden Gate Bakery</span><span>Bakery · $</span></button></div>"#,
    );
    let records = RecordExtractor::new().extract(&tree);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "golden gate bakery");
    assert_eq!(records[0].category_price, "4.5 bakery · $");
}

#[test]
fn boundaries_are_shared_and_never_the_container() {
    let tree = HtmlTree::parse(
        r#"<div role="main">
            <button><img alt=""><h3>Stray Entry</h3></button>
            <div class="entry">
                <button><img alt=""><h3>First Half</h3></button>
                <button><img alt=""><h3>Second Half</h3></button>
            </div>
        </div>"#,
    );
    let extractor = RecordExtractor::new();
    let names: Vec<_> = extractor.extract(&tree).into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["first half", "second half"]);
    assert_eq!(
        extractor.fingerprint(&tree).as_str(),
        "3|first half|second half"
    );
}

#[test]
fn entries_sharing_a_wrapper_stay_visible_together() {
    let mut tree = page(
        r#"<div class="row">
            <button><img alt=""><h3>Alpha Cafe</h3></button>
            <button><img alt=""><h3>Beta Bookstore</h3></button>
        </div>
        <div class="row"><button><img alt=""><h3>Gamma Park</h3></button></div>"#,
    );
    let extractor = RecordExtractor::new();
    assert_eq!(extractor.extract(&tree).len(), 3);

    let outcome = apply_filter(&mut tree, &extractor, &parse("bookstore"));
    assert_eq!(outcome, FilterOutcome { shown: 2, hidden: 1 });
    assert_eq!(visible_names(&tree), vec!["alpha cafe", "beta bookstore"]);

    let outcome = apply_filter(&mut tree, &extractor, &parse("-bookstore"));
    assert_eq!(outcome, FilterOutcome { shown: 1, hidden: 2 });
    assert_eq!(visible_names(&tree), vec!["gamma park"]);
}

#[test]
fn plain_buttons_are_not_entries() {
    let tree = page(
        r#"<div><button aria-label="Share"><img alt="share icon"></button></div>
           <div><button><span>Sort</span></button></div>"#,
    );
    assert!(RecordExtractor::new().extract(&tree).is_empty());
}

#[test]
fn aria_roles_and_labels_count() {
    let mut tree = page(
        r#"<div><div role="button"><div role="img" aria-label="Storefront photo"></div><h3>Corner Deli</h3></div></div>"#,
    );
    let records = RecordExtractor::new().extract(&tree);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "corner deli");

    apply_filter(&mut tree, &RecordExtractor::new(), &parse("storefront"));
    assert_eq!(visible_names(&tree), vec!["corner deli"]);
}

#[test]
fn accents_do_not_block_matches() {
    let mut tree = page(&entry("Café Olé", "Cafe", None));
    apply_filter(&mut tree, &RecordExtractor::new(), &parse("cafe ole"));
    assert_eq!(visible_names(&tree), vec!["café olé"]);
}

#[test]
fn missing_container_yields_nothing() {
    let tree = HtmlTree::parse(&format!("<div>{}</div>", entry("Lonely", "Cafe", None)));
    assert!(tree.container().is_none());
    let extractor = RecordExtractor::new();
    assert!(extractor.extract(&tree).is_empty());
    assert_eq!(extractor.fingerprint(&tree).as_str(), "0");
}

#[test]
fn fingerprint_uses_count_and_leading_names() {
    let tree = page(
        &["Alpha", "Bravo", "Charlie", "Delta"]
            .iter()
            .map(|name| entry(name, "Cafe", None))
            .collect::<String>(),
    );
    assert_eq!(
        RecordExtractor::new().fingerprint(&tree).as_str(),
        "4|alpha|bravo|charlie"
    );
}
