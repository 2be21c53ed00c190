use std::sync::Arc;

use crate::cache::KeywordCache;
use crate::config::Config;
use crate::keywords::builder::KeywordSetBuilder;
use crate::keywords::source::KeywordSource;
use crate::text::tokenize::Tokenizer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stopword-bound tokenizer used to index resumes.
    pub tokenizer: Tokenizer,
    /// Local extraction pipeline; also the fallback when the primary source comes back empty.
    pub keyword_builder: KeywordSetBuilder,
    /// Primary keyword source. Local by default, LLM via `KEYWORD_SOURCE=llm`.
    pub keyword_source: Arc<dyn KeywordSource>,
    pub cache: Arc<dyn KeywordCache>,
}
