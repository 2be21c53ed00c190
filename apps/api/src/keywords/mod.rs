// Keyword extraction from job descriptions: section classification, local
// set building, and the pluggable sources (local or LLM-backed).

pub mod builder;
pub mod prompts;
pub mod sections;
pub mod source;
