//! Term extraction and the token validity predicate.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::text::stopwords::Stopwords;

static TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9+#./-]+").expect("valid term regex"));

/// Characters trimmed from both ends of a raw match. `#` is kept so `c#` survives.
const EDGE_PUNCTUATION: &[char] = &['-', '.', '/', '+', ' '];

fn in_term_class(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '.' | '/' | '-')
}

/// Splits text into candidate terms, in document order.
///
/// Each regex match is stripped of edge punctuation and re-filtered to the
/// term character class. Empty leftovers are dropped; nothing else is, so the
/// result still contains stopwords and short terms. That order is what n-gram
/// adjacency is computed over.
pub fn extract_terms(text: &str) -> Vec<String> {
    TERM.find_iter(text)
        .filter_map(|m| {
            let term: String = m
                .as_str()
                .trim_matches(EDGE_PUNCTUATION)
                .chars()
                .filter(|c| in_term_class(*c))
                .collect();
            (!term.is_empty()).then_some(term)
        })
        .collect()
}

/// Tokenizer bound to a stopword configuration.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: Arc<Stopwords>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Arc::new(Stopwords::default()))
    }
}

impl Tokenizer {
    pub fn new(stopwords: Arc<Stopwords>) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    /// Candidate terms in order. See [`extract_terms`].
    pub fn terms(&self, text: &str) -> Vec<String> {
        extract_terms(text)
    }

    /// The token validity predicate: non-empty, at least two characters, made
    /// only of term characters, not all digits, not a stopword.
    pub fn is_valid(&self, term: &str) -> bool {
        if term.chars().count() < 2 || !term.chars().all(in_term_class) {
            return false;
        }
        if term.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        !self.stopwords.contains(term)
    }

    /// The valid subset of `terms`, order and duplicates kept.
    pub fn valid_tokens(&self, terms: &[String]) -> Vec<String> {
        terms.iter().filter(|t| self.is_valid(t)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_terms_splits_on_other_characters() {
        assert_eq!(
            extract_terms("python, sql; (docker) & k8s!"),
            vec!["python", "sql", "docker", "k8s"]
        );
    }

    #[test]
    fn test_extract_terms_keeps_symbol_terms() {
        assert_eq!(
            extract_terms("c# node.js ci/cd front-end"),
            vec!["c#", "node.js", "ci/cd", "front-end"]
        );
    }

    #[test]
    fn test_extract_terms_strips_edge_punctuation() {
        assert_eq!(
            extract_terms("aws. -rust- /api/ ...go+"),
            vec!["aws", "rust", "api", "go"]
        );
    }

    #[test]
    fn test_extract_terms_drops_pure_punctuation() {
        assert!(extract_terms("- ... / + --").is_empty());
    }

    #[test]
    fn test_extract_terms_preserves_case() {
        assert_eq!(extract_terms("Rust SQL"), vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_validity_rejects_short_numeric_and_stopwords() {
        let tokenizer = Tokenizer::default();
        assert!(!tokenizer.is_valid(""));
        assert!(!tokenizer.is_valid("r"));
        assert!(!tokenizer.is_valid("2024"));
        assert!(!tokenizer.is_valid("the"));
        assert!(!tokenizer.is_valid("with space"));
        assert!(tokenizer.is_valid("go"));
        assert!(tokenizer.is_valid("3.5"));
        assert!(tokenizer.is_valid("k8s"));
    }

    #[test]
    fn test_tokens_filters_invalid_terms_in_order() {
        let tokenizer = Tokenizer::default();
        let terms = tokenizer.terms("5 years of python and the sql a b");
        assert_eq!(tokenizer.valid_tokens(&terms), vec!["python", "sql"]);
    }

    #[test]
    fn test_custom_stopwords_are_honoured() {
        let tokenizer = Tokenizer::new(Arc::new(Stopwords::from_words(["python"])));
        let terms = tokenizer.terms("python rust");
        assert_eq!(tokenizer.valid_tokens(&terms), vec!["rust"]);
    }
}
