//! Local keyword extraction: section text → filtered token and phrase sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::keywords::sections::{classify_sections, HeadingCues};
use crate::text::ngrams::{build_ngrams, WindowFilter, CANDIDATE_NGRAM_RANGE, MATCH_NGRAM_RANGE};
use crate::text::normalize::normalize;
use crate::text::tokenize::{extract_terms, Tokenizer};

/// A deduplicated set of canonical (lower-case, single-spaced) terms.
/// Terms containing a space are phrases; the rest are single words.
pub type KeywordSet = BTreeSet<String>;

/// Required and preferred keyword sets for one job description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSets {
    pub required: KeywordSet,
    pub preferred: KeywordSet,
}

impl KeywordSets {
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.preferred.is_empty()
    }

    /// Canonicalizes externally supplied terms with [`canonical_term`];
    /// terms with no matchable form are dropped.
    pub fn canonical<R, P>(required: R, preferred: P, tokenizer: &Tokenizer) -> Self
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        fn canon<I>(terms: I, tokenizer: &Tokenizer) -> KeywordSet
        where
            I: IntoIterator,
            I::Item: AsRef<str>,
        {
            terms
                .into_iter()
                .filter_map(|t| canonical_term(t.as_ref(), tokenizer))
                .collect()
        }

        Self {
            required: canon(required, tokenizer),
            preferred: canon(preferred, tokenizer),
        }
    }
}

/// Reduces a keyword from an external source to the form the resume index
/// stores, or `None` if no resume could ever match it.
///
/// The term is normalized and split exactly like resume text, so edge
/// punctuation goes (`.NET` becomes `net`, `C++` becomes `c` and is then
/// rejected). A single term must be a valid token. A phrase must have at most
/// five terms and pass [`WindowFilter::Indexable`].
pub fn canonical_term(raw: &str, tokenizer: &Tokenizer) -> Option<String> {
    let terms = extract_terms(&normalize(raw));
    let (_, max) = MATCH_NGRAM_RANGE;

    match terms.as_slice() {
        [] => None,
        [single] => tokenizer.is_valid(single).then(|| single.clone()),
        window if window.len() <= max && WindowFilter::Indexable.keeps(window, tokenizer) => {
            Some(window.join(" "))
        }
        _ => None,
    }
}

/// Turns section text into keyword candidates using the tokenizer's stopwords
/// and the configured heading cues.
#[derive(Debug, Clone, Default)]
pub struct KeywordSetBuilder {
    tokenizer: Tokenizer,
    cues: HeadingCues,
}

impl KeywordSetBuilder {
    pub fn new(tokenizer: Tokenizer, cues: HeadingCues) -> Self {
        Self { tokenizer, cues }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Valid tokens plus valid 2–3 term phrases found in `section_text`.
    pub fn extract(&self, section_text: &str) -> KeywordSet {
        let normalized = normalize(section_text);
        let terms = self.tokenizer.terms(&normalized);
        let (min, max) = CANDIDATE_NGRAM_RANGE;

        let mut set: KeywordSet = self.tokenizer.valid_tokens(&terms).into_iter().collect();
        set.extend(build_ngrams(
            &terms,
            min,
            max,
            WindowFilter::ValidTokens,
            &self.tokenizer,
        ));
        set
    }

    /// Builds required / preferred sets from text cleaned by `clean_job_text`.
    ///
    /// When neither section yields anything (typically: no recognizable
    /// headings), the whole text is extracted as `required` and `preferred`
    /// stays empty.
    pub fn build_keyword_sets(&self, cleaned_job_text: &str) -> KeywordSets {
        let sections = classify_sections(cleaned_job_text, &self.cues);
        let sets = KeywordSets {
            required: self.extract(&sections.required),
            preferred: self.extract(&sections.preferred),
        };

        if !sets.is_empty() {
            return sets;
        }

        debug!("No keywords under recognizable headings, extracting from full text");
        KeywordSets {
            required: self.extract(cleaned_job_text),
            preferred: KeywordSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize::clean_job_text;

    fn set(terms: &[&str]) -> KeywordSet {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_extract_tokens_and_phrases() {
        let builder = KeywordSetBuilder::default();
        let keywords = builder.extract("Machine Learning with PyTorch");
        assert_eq!(
            keywords,
            set(&["machine", "learning", "pytorch", "machine learning"])
        );
    }

    #[test]
    fn test_extract_caps_phrases_at_three_terms() {
        let builder = KeywordSetBuilder::default();
        let keywords = builder.extract("distributed stream processing pipelines");
        assert!(keywords.contains("distributed stream processing"));
        assert!(keywords.contains("stream processing pipelines"));
        assert!(!keywords.contains("distributed stream processing pipelines"));
    }

    #[test]
    fn test_stopword_only_section_is_empty() {
        let builder = KeywordSetBuilder::default();
        assert!(builder.extract("and the for").is_empty());
    }

    #[test]
    fn test_extract_drops_numbers_and_single_characters() {
        let builder = KeywordSetBuilder::default();
        assert_eq!(builder.extract("5+ years R 2024"), KeywordSet::new());
    }

    #[test]
    fn test_build_uses_section_bodies() {
        let builder = KeywordSetBuilder::default();
        let cleaned = clean_job_text(
            "Acme Corp builds rockets\nRequirements:\nPython\nSQL\nPreferred:\nDocker",
        );
        let sets = builder.build_keyword_sets(&cleaned);
        // adjacent lines are adjacent terms once the section is normalized
        assert_eq!(sets.required, set(&["python", "sql", "python sql"]));
        assert_eq!(sets.preferred, set(&["docker"]));
        assert!(!sets.required.contains("rockets"));
    }

    #[test]
    fn test_build_falls_back_to_full_text_as_required() {
        let builder = KeywordSetBuilder::default();
        let cleaned = clean_job_text("We use Python and Kubernetes daily");
        let sets = builder.build_keyword_sets(&cleaned);
        assert!(sets.required.contains("python"));
        assert!(sets.required.contains("kubernetes"));
        assert!(sets.preferred.is_empty());
    }

    #[test]
    fn test_build_on_stopwords_only_yields_nothing() {
        let builder = KeywordSetBuilder::default();
        assert!(builder.build_keyword_sets("and the for").is_empty());
    }

    #[test]
    fn test_canonical_collapses_case_and_spacing() {
        let sets = KeywordSets::canonical(
            ["Python", "python", "  Vertex   AI ", ""],
            vec!["Node.js".to_string()],
            &Tokenizer::default(),
        );
        assert_eq!(sets.required, set(&["python", "vertex ai"]));
        assert_eq!(sets.preferred, set(&["node.js"]));
    }

    #[test]
    fn test_canonical_strips_edge_punctuation_and_drops_invalid_words() {
        let sets = KeywordSets::canonical(
            ["C++", "Python", ".NET", "R", "the", "2024"],
            Vec::<String>::new(),
            &Tokenizer::default(),
        );
        assert_eq!(sets.required, set(&["net", "python"]));
    }

    #[test]
    fn test_canonical_phrases_follow_resume_windows() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            canonical_term("Ruby on Rails", &tokenizer).as_deref(),
            Some("ruby on rails")
        );
        assert_eq!(
            canonical_term("CI/CD (GitHub Actions)", &tokenizer).as_deref(),
            Some("ci/cd github actions")
        );
        assert_eq!(canonical_term("and the", &tokenizer), None);
        assert_eq!(canonical_term("python 3", &tokenizer), None);
        assert_eq!(canonical_term("one two three four five six", &tokenizer), None);
    }

    #[test]
    fn test_keyword_sets_roundtrip_as_lists() {
        let sets = KeywordSets {
            required: set(&["sql", "python"]),
            preferred: set(&["docker"]),
        };
        let json = serde_json::to_string(&sets).unwrap();
        assert_eq!(json, r#"{"required":["python","sql"],"preferred":["docker"]}"#);
        let back: KeywordSets =
            serde_json::from_str(r#"{"required":["sql","python","sql"],"preferred":["docker"]}"#)
                .unwrap();
        assert_eq!(back, sets);
    }
}
