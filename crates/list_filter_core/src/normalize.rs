use unicode_normalization::UnicodeNormalization;

/// Folds diacritics away: canonical decomposition, then combining marks
/// in U+0300..=U+036F are dropped. Case is left untouched.
pub fn normalize(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_diacritic(*c)).collect()
}

/// Trims and collapses every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lower-case, collapse, fold. The form all matching happens in.
pub fn fold_for_matching(text: &str) -> String {
    normalize(&collapse_whitespace(&text.to_lowercase()))
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::{collapse_whitespace, fold_for_matching, normalize};

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn plain_ascii_is_untouched() {
        assert_eq!(normalize("hello world"), "hello world");
    }

    #[test]
    fn strips_common_accents() {
        assert_eq!(normalize("áéíóú"), "aeiou");
        assert_eq!(normalize("àèìòù"), "aeiou");
        assert_eq!(normalize("âêîôû"), "aeiou");
        assert_eq!(normalize("ãñõ"), "ano");
        assert_eq!(normalize("äëïöü"), "aeiou");
    }

    #[test]
    fn keeps_case_decisions_to_the_caller() {
        assert_eq!(normalize("Olá Mundo!"), "Ola Mundo!");
        assert_eq!(normalize("Crème brûlée"), "Creme brulee");
        assert_eq!(
            normalize("déjà vu à la Pâtisserie"),
            "deja vu a la Patisserie"
        );
    }

    #[test]
    fn is_idempotent() {
        for sample in ["Café Olé", "naïve", "ﬁ ligature", "日本語", "Ångström", ""] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "sample {sample:?}");
        }
    }

    #[test]
    fn collapse_trims_and_squeezes() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn fold_lowers_collapses_and_strips() {
        assert_eq!(fold_for_matching("  CAFÉ\n  Olé "), "cafe ole");
    }
}
