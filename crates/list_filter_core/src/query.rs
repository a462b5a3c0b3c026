use std::fmt;

use crate::normalize::normalize;

/// A free-text query split into include and exclude terms, both lower-cased.
///
/// Include terms keep their order and duplicates. Exclude terms behave as a set
/// but remember first-seen order so the query can be displayed back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedQuery {
    include_terms: Vec<String>,
    exclude_terms: Vec<String>,
}

impl ParsedQuery {
    pub fn include_terms(&self) -> &[String] {
        &self.include_terms
    }

    pub fn exclude_terms(&self) -> &[String] {
        &self.exclude_terms
    }

    pub fn is_empty(&self) -> bool {
        self.include_terms.is_empty() && self.exclude_terms.is_empty()
    }

    /// Include terms joined with single spaces and diacritic-folded.
    /// `None` when there are no include terms.
    pub fn include_phrase(&self) -> Option<String> {
        if self.include_terms.is_empty() {
            None
        } else {
            Some(normalize(&self.include_terms.join(" ")))
        }
    }

    fn push_exclude(&mut self, term: String) {
        if !self.exclude_terms.contains(&term) {
            self.exclude_terms.push(term);
        }
    }
}

impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let includes = self.include_terms.iter().map(String::as_str);
        let excludes = self.exclude_terms.iter().map(|t| format!("-{t}"));
        let parts: Vec<String> = includes.map(str::to_owned).chain(excludes).collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Parses raw query text. Never fails; blank input gives an empty query.
pub fn parse(input: &str) -> ParsedQuery {
    let lowered = input.to_lowercase();
    let mut query = ParsedQuery::default();
    for token in lowered.split_whitespace() {
        match token.strip_prefix('-') {
            Some("") => {}
            Some(excluded) => query.push_exclude(excluded.to_string()),
            None => query.include_terms.push(token.to_string()),
        }
    }
    query
}

#[cfg(test)]
mod tests {
    use super::parse;

    #[test]
    fn display_reconstructs_includes_then_excludes() {
        let query = parse("Coffee -Chain  roasters");
        assert_eq!(query.to_string(), "coffee roasters -chain");
    }

    #[test]
    fn include_phrase_is_folded() {
        assert_eq!(parse("Café Olé").include_phrase().as_deref(), Some("cafe ole"));
        assert_eq!(parse("-x").include_phrase(), None);
    }
}
