//! Stopword configuration shared by keyword extraction and resume indexing.
//!
//! The set is built once at startup and only ever read afterwards; callers
//! hold it behind an `Arc` or borrow it.

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// Function words the NLTK English list leaves out but job posts lean on.
static ENGLISH_EXTRA: &[&str] = &[
    "also", "could", "either", "etc", "e.g", "i.e", "may", "might", "must", "per", "shall",
    "upon", "us", "via", "within", "without", "would",
];

/// Boilerplate that carries no skill signal in a job description.
static JOB_FILLER: &[&str] = &[
    "ability", "able", "candidate", "candidates", "experience", "including", "knowledge",
    "plus", "role", "skills", "strong", "team", "understanding", "work", "working",
    "year", "years",
];

/// An immutable, lower-cased stopword set.
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Default for Stopwords {
    /// NLTK English stopwords plus job-posting filler.
    fn default() -> Self {
        let english = stop_words::get(LANGUAGE::English);
        Self::from_words(english.iter().chain(ENGLISH_EXTRA).chain(JOB_FILLER))
    }
}

impl Stopwords {
    /// Builds a stopword set from an arbitrary word list. Words are lower-cased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, term: &str) -> bool {
        if self.words.contains(term) {
            return true;
        }
        self.words.contains(&term.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}
