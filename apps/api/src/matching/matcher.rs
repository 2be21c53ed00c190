//! Word / phrase matching of keyword sets against a resume.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::keywords::builder::KeywordSet;
use crate::matching::scorer::compute_score;
use crate::text::ngrams::{build_ngrams, WindowFilter, MATCH_NGRAM_RANGE};
use crate::text::normalize::normalize;
use crate::text::tokenize::Tokenizer;

/// Lookup structure for one resume: its valid tokens and its 2–5 term n-grams.
/// N-grams may carry inner stopwords ("ruby on rails").
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    tokens: HashSet<String>,
    ngrams: HashSet<String>,
}

impl MatchIndex {
    pub fn build(resume_text: &str, tokenizer: &Tokenizer) -> Self {
        let normalized = normalize(resume_text);
        let terms = tokenizer.terms(&normalized);
        let (min, max) = MATCH_NGRAM_RANGE;

        let tokens = tokenizer.valid_tokens(&terms).into_iter().collect();
        let ngrams = build_ngrams(&terms, min, max, WindowFilter::Indexable, tokenizer)
            .into_iter()
            .collect();

        Self { tokens, ngrams }
    }

    pub fn contains_word(&self, term: &str) -> bool {
        self.tokens.contains(&term.trim().to_lowercase())
    }

    pub fn contains_phrase(&self, term: &str) -> bool {
        self.ngrams.contains(&term.trim().to_lowercase())
    }

    /// A term with an internal space is a phrase and must appear as an n-gram;
    /// anything else must appear as a token.
    pub fn hit(&self, term: &str) -> bool {
        if is_phrase(term) {
            self.contains_phrase(term)
        } else {
            self.contains_word(term)
        }
    }
}

pub fn is_phrase(term: &str) -> bool {
    term.trim().contains(' ')
}

/// Matched and missing terms per keyword set, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub matched_preferred: Vec<String>,
    pub missing_preferred: Vec<String>,
}

impl MatchResult {
    /// Weighted score over this result. The original set sizes are the
    /// matched + missing counts.
    pub fn score(&self) -> f64 {
        compute_score(
            self.matched_required.len() + self.missing_required.len(),
            self.matched_preferred.len() + self.missing_preferred.len(),
            self.matched_required.len(),
            self.matched_preferred.len(),
        )
    }
}

/// Splits `set` into (matched, missing), both sorted lexicographically.
pub fn partition(set: &KeywordSet, index: &MatchIndex) -> (Vec<String>, Vec<String>) {
    let (mut matched, mut missing): (Vec<String>, Vec<String>) =
        set.iter().cloned().partition(|term| index.hit(term));
    matched.sort();
    missing.sort();
    (matched, missing)
}

/// Matches required and preferred keyword sets against raw resume text.
pub fn match_sets(
    resume_text: &str,
    required: &KeywordSet,
    preferred: &KeywordSet,
    tokenizer: &Tokenizer,
) -> MatchResult {
    let index = MatchIndex::build(resume_text, tokenizer);
    let (matched_required, missing_required) = partition(required, &index);
    let (matched_preferred, missing_preferred) = partition(preferred, &index);

    MatchResult {
        matched_required,
        missing_required,
        matched_preferred,
        missing_preferred,
    }
}
