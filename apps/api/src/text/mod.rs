// Deterministic text pipeline: normalization, tokenization, n-grams.
// Everything here is a pure function of its input; the only shared value is
// the read-only stopword set.

pub mod ngrams;
pub mod normalize;
pub mod stopwords;
pub mod tokenize;
