//! Keyword normalization for the comma-separated keyword field.

use std::collections::HashSet;

/// Splits raw keyword text on commas into an ordered, de-duplicated term set.
///
/// Terms are trimmed and empty tokens dropped. Duplicates are detected
/// case-insensitively and the first spelling seen is kept.
pub fn normalize(raw: &str) -> Vec<String> {
    normalize_terms(raw.split(','))
}

/// Applies the same rules as [`normalize`] to terms that are already split.
pub fn normalize_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for term in terms {
        let term = term.as_ref().trim();
        if term.is_empty() {
            continue;
        }
        if seen.insert(term.to_lowercase()) {
            out.push(term.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_trims_and_drops_empty_tokens() {
        assert_eq!(
            normalize(" remote work ,, productivity ,  "),
            vec!["remote work", "productivity"]
        );
    }

    #[test]
    fn dedupes_case_insensitively_keeping_first_spelling() {
        assert_eq!(normalize("SEO, seo, Content, SEO "), vec!["SEO", "Content"]);
    }

    #[test]
    fn empty_input_yields_empty_set() {
        assert!(normalize("").is_empty());
        assert!(normalize(" , ,").is_empty());
    }

    #[test]
    fn normalize_terms_matches_normalize() {
        let terms = vec!["AI ".to_string(), "ai".to_string(), "healthcare".to_string()];
        assert_eq!(normalize_terms(&terms), normalize("AI , ai, healthcare"));
    }
}
