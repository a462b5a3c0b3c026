use list_filter_core::{fold_for_matching, matches, normalize, parse, Record};

fn record(id: usize, name: &str, category: &str, note: &str) -> Record<usize> {
    let text = format!("{name} {category} {note}");
    Record {
        element: id,
        name: name.to_lowercase(),
        category_price: category.to_lowercase(),
        note: note.to_lowercase(),
        aggregated_text: fold_for_matching(&text),
    }
}

fn fixtures() -> Vec<Record<usize>> {
    vec![
        record(1, "Coffee Supreme", "Coffee shop", "cold brew"),
        record(2, "Page Turner Bookstore", "Used Bookstore", ""),
        record(3, "Central Park", "Park", ""),
        record(4, "Café Olé", "Spanish Bistro", "Serves Pâtisserie"),
    ]
}

fn visible(query: &str, records: &[Record<usize>]) -> Vec<String> {
    let parsed = parse(query);
    records
        .iter()
        .filter(|r| matches(r, &parsed))
        .map(|r| r.name.clone())
        .collect()
}

#[test]
fn empty_query_matches_everything() {
    let records = fixtures();
    for r in &records {
        assert!(matches(r, &parse("")));
    }
}

#[test]
fn missing_term_never_matches() {
    for term in ["zebra", "sushi", "Bookstores"] {
        for r in fixtures() {
            if !r.aggregated_text.contains(&normalize(&term.to_lowercase())) {
                assert!(!matches(&r, &parse(term)), "{term} vs {}", r.name);
            }
        }
    }
}

#[test]
fn exclude_dominates_include() {
    let records = fixtures();
    let coffee = &records[0];
    assert!(matches(coffee, &parse("coffee")));
    assert!(!matches(coffee, &parse("coffee -brew")));
}

#[test]
fn diacritics_are_folded_both_ways() {
    let records = fixtures();
    let cafe = &records[3];
    assert!(matches(cafe, &parse("cafe")));
    assert!(matches(cafe, &parse("cafe ole")));
    assert!(matches(cafe, &parse("patisserie")));
    assert!(matches(cafe, &parse("pâtisserie")));
    assert!(!matches(cafe, &parse("-café")));
}

#[test]
fn include_terms_match_as_one_phrase() {
    let records = fixtures();
    let coffee = &records[0];
    assert!(matches(coffee, &parse("coffee supreme")));
    // Both words occur, but not as the joined phrase.
    assert!(!matches(coffee, &parse("supreme coffee")));
}

#[test]
fn bookstore_scenario() {
    let records: Vec<_> = fixtures().into_iter().take(3).collect();
    assert!(visible("Bookstore -used", &records).is_empty());
    assert_eq!(visible("-Coffee -Bookstore", &records), vec!["central park"]);
    assert_eq!(visible("", &records).len(), 3);
}
