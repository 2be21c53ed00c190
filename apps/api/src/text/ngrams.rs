//! Contiguous phrase windows over a term sequence.

use crate::text::tokenize::Tokenizer;

/// Window bounds used when indexing a resume for matching.
pub const MATCH_NGRAM_RANGE: (usize, usize) = (2, 5);
/// Window bounds used when extracting keyword candidates from a job description.
pub const CANDIDATE_NGRAM_RANGE: (usize, usize) = (2, 3);

/// Which windows survive [`build_ngrams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFilter {
    /// Every term must pass the token validity predicate. Keyword candidates.
    ValidTokens,
    /// Stopwords and short terms may appear inside a window, purely numeric
    /// terms may not. Resume indexing, so "ruby on rails" stays matchable.
    Indexable,
}

impl WindowFilter {
    /// Windows made only of stopwords are dropped under either filter.
    pub fn keeps(self, window: &[String], tokenizer: &Tokenizer) -> bool {
        let stopwords = tokenizer.stopwords();
        if window.iter().all(|t| stopwords.contains(t)) {
            return false;
        }
        match self {
            Self::ValidTokens => window.iter().all(|t| tokenizer.is_valid(t)),
            Self::Indexable => window
                .iter()
                .all(|t| !t.is_empty() && !t.chars().all(|c| c.is_ascii_digit())),
        }
    }
}

/// Builds every contiguous window of `min..=max` terms, joined by single spaces.
///
/// Output is left to right within each length, shortest length first.
pub fn build_ngrams(
    terms: &[String],
    min: usize,
    max: usize,
    filter: WindowFilter,
    tokenizer: &Tokenizer,
) -> Vec<String> {
    let min = min.max(2);
    let mut grams = Vec::new();

    for n in min..=max {
        if n > terms.len() {
            break;
        }
        for window in terms.windows(n) {
            if filter.keeps(window, tokenizer) {
                grams.push(window.join(" "));
            }
        }
    }

    grams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::stopwords::Stopwords;
    use std::sync::Arc;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_windows_in_order_by_length() {
        let tokenizer = Tokenizer::default();
        let grams = build_ngrams(
            &terms(&["rust", "async", "tokio"]),
            2,
            3,
            WindowFilter::ValidTokens,
            &tokenizer,
        );
        assert_eq!(grams, vec!["rust async", "async tokio", "rust async tokio"]);
    }

    #[test]
    fn test_window_with_stopword_is_dropped() {
        let tokenizer = Tokenizer::default();
        let grams = build_ngrams(
            &terms(&["expert", "in", "machine", "learning", "systems"]),
            2,
            5,
            WindowFilter::ValidTokens,
            &tokenizer,
        );
        assert!(grams.contains(&"machine learning".to_string()));
        assert!(grams.contains(&"machine learning systems".to_string()));
        assert!(!grams.contains(&"expert in".to_string()));
        assert!(!grams.contains(&"expert in machine".to_string()));
    }

    #[test]
    fn test_window_with_short_or_numeric_term_is_dropped() {
        let tokenizer = Tokenizer::default();
        let grams = build_ngrams(
            &terms(&["python", "3", "django"]),
            2,
            3,
            WindowFilter::ValidTokens,
            &tokenizer,
        );
        assert!(grams.is_empty());
    }

    #[test]
    fn test_sequence_shorter_than_min_yields_nothing() {
        let tokenizer = Tokenizer::default();
        for filter in [WindowFilter::ValidTokens, WindowFilter::Indexable] {
            assert!(build_ngrams(&terms(&["rust"]), 2, 5, filter, &tokenizer).is_empty());
            assert!(build_ngrams(&[], 2, 5, filter, &tokenizer).is_empty());
        }
    }

    #[test]
    fn test_max_bound_is_respected() {
        let tokenizer = Tokenizer::new(Arc::new(Stopwords::from_words(Vec::<String>::new())));
        let words = terms(&["aa", "bb", "cc", "dd", "ee", "ff"]);
        let grams = build_ngrams(&words, 2, 5, WindowFilter::Indexable, &tokenizer);
        assert!(grams.iter().all(|g| g.split(' ').count() <= 5));
        // 5 bigrams + 4 trigrams + 3 four-grams + 2 five-grams
        assert_eq!(grams.len(), 14);
    }

    #[test]
    fn test_indexable_windows_keep_inner_stopwords() {
        let tokenizer = Tokenizer::default();
        let words = terms(&["built", "infrastructure", "as", "code", "on", "ruby", "on", "rails"]);
        let grams = build_ngrams(&words, 2, 5, WindowFilter::Indexable, &tokenizer);
        assert!(grams.contains(&"infrastructure as code".to_string()));
        assert!(grams.contains(&"ruby on rails".to_string()));
        assert!(!grams.contains(&"as code on ruby on rails".to_string()));

        let strict = build_ngrams(&words, 2, 3, WindowFilter::ValidTokens, &tokenizer);
        assert!(!strict.contains(&"infrastructure as code".to_string()));
    }

    #[test]
    fn test_indexable_windows_drop_numbers_and_stopword_runs() {
        let tokenizer = Tokenizer::default();
        let grams = build_ngrams(
            &terms(&["python", "3", "and", "the", "c"]),
            2,
            5,
            WindowFilter::Indexable,
            &tokenizer,
        );
        assert!(!grams.iter().any(|g| g.split(' ').any(|t| t == "3")));
        assert!(!grams.contains(&"and the".to_string()));
        assert!(grams.contains(&"the c".to_string()));
    }
}
