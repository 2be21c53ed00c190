//! Pluggable keyword sources.
//!
//! Default: `LocalKeywordSource` (heading-aware extraction, deterministic).
//! Optional: `LlmKeywordSource` (Claude, enabled via `KEYWORD_SOURCE=llm`).
//!
//! `AppState` holds an `Arc<dyn KeywordSource>`, chosen at startup from config.
//! Sources never fail: any internal problem yields two empty sets.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::keywords::builder::{KeywordSetBuilder, KeywordSets};
use crate::keywords::prompts::KEYWORD_EXTRACTION_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json_reply, LlmClient, LlmError};
use crate::text::tokenize::Tokenizer;

/// Upper bound on terms accepted per list from the model.
const MAX_TERMS_PER_LIST: usize = 30;

/// Where a keyword set came from. Reported back to callers for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordOrigin {
    Cache,
    Llm,
    Local,
}

#[async_trait]
pub trait KeywordSource: Send + Sync {
    fn origin(&self) -> KeywordOrigin;

    /// Extracts required / preferred keywords from a cleaned job description.
    /// Returns empty sets instead of failing.
    async fn extract(&self, cleaned_job_text: &str) -> KeywordSets;
}

// ────────────────────────────────────────────────────────────────────────────
// LocalKeywordSource
// ────────────────────────────────────────────────────────────────────────────

pub struct LocalKeywordSource {
    builder: KeywordSetBuilder,
}

impl LocalKeywordSource {
    pub fn new(builder: KeywordSetBuilder) -> Self {
        Self { builder }
    }
}

#[async_trait]
impl KeywordSource for LocalKeywordSource {
    fn origin(&self) -> KeywordOrigin {
        KeywordOrigin::Local
    }

    async fn extract(&self, cleaned_job_text: &str) -> KeywordSets {
        self.builder.build_keyword_sets(cleaned_job_text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmKeywordSource
// ────────────────────────────────────────────────────────────────────────────

/// JSON shape the model is asked to return.
#[derive(Debug, Default, Deserialize)]
struct KeywordReply {
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    preferred: Vec<String>,
}

impl KeywordReply {
    fn into_sets(self, tokenizer: &Tokenizer) -> KeywordSets {
        KeywordSets::canonical(
            self.required.into_iter().take(MAX_TERMS_PER_LIST),
            self.preferred.into_iter().take(MAX_TERMS_PER_LIST),
            tokenizer,
        )
    }
}

/// Keyword extraction via Claude. A missing API key, an API failure, a
/// malformed reply or a blown deadline all produce empty sets. Reply terms
/// are reduced to what the resume tokenizer can match.
pub struct LlmKeywordSource {
    client: Option<LlmClient>,
    deadline: Duration,
    tokenizer: Tokenizer,
}

impl LlmKeywordSource {
    pub fn new(client: Option<LlmClient>, deadline: Duration, tokenizer: Tokenizer) -> Self {
        if let Some(client) = &client {
            info!("LLM keyword source initialized (model: {})", client.model());
        }
        Self {
            client,
            deadline,
            tokenizer,
        }
    }
}

#[async_trait]
impl KeywordSource for LlmKeywordSource {
    fn origin(&self) -> KeywordOrigin {
        KeywordOrigin::Llm
    }

    async fn extract(&self, cleaned_job_text: &str) -> KeywordSets {
        let Some(client) = &self.client else {
            warn!("No LLM API key configured, keyword extraction returns nothing");
            return KeywordSets::default();
        };

        let prompt = KEYWORD_EXTRACTION_PROMPT_TEMPLATE.replace("{jd_text}", cleaned_job_text);
        let call = client.call(&prompt, JSON_ONLY_SYSTEM);

        match tokio::time::timeout(self.deadline, call).await {
            Ok(Ok(response)) => match response.text() {
                Some(text) => keywords_from_reply(text, &self.tokenizer),
                None => {
                    error!("LLM keyword extraction failed: {}", LlmError::EmptyContent);
                    KeywordSets::default()
                }
            },
            Ok(Err(e)) => {
                error!("LLM keyword extraction failed: {e}");
                KeywordSets::default()
            }
            Err(_) => {
                warn!(
                    "LLM keyword extraction exceeded {}ms deadline",
                    self.deadline.as_millis()
                );
                KeywordSets::default()
            }
        }
    }
}

/// Parses a raw model reply into keyword sets; malformed replies become empty sets.
pub fn keywords_from_reply(text: &str, tokenizer: &Tokenizer) -> KeywordSets {
    match parse_json_reply::<KeywordReply>(text) {
        Ok(reply) => reply.into_sets(tokenizer),
        Err(e) => {
            error!("LLM returned an unusable keyword reply: {e}");
            KeywordSets::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::matcher::match_sets;

    #[tokio::test]
    async fn test_local_source_extracts_sections() {
        let source = LocalKeywordSource::new(KeywordSetBuilder::default());
        let sets = source
            .extract("Requirements:\nRust\nNice to have:\nTerraform")
            .await;
        assert!(sets.required.contains("rust"));
        assert!(sets.preferred.contains("terraform"));
        assert_eq!(source.origin(), KeywordOrigin::Local);
    }

    #[tokio::test]
    async fn test_llm_source_without_key_returns_empty() {
        let source = LlmKeywordSource::new(None, Duration::from_secs(1), Tokenizer::default());
        let sets = source.extract("Requirements:\nRust").await;
        assert!(sets.is_empty());
        assert_eq!(source.origin(), KeywordOrigin::Llm);
    }

    #[test]
    fn test_reply_is_canonicalized() {
        let sets = keywords_from_reply(
            r#"{"required": ["Python", "Vertex AI", "python"], "preferred": ["Go"]}"#,
            &Tokenizer::default(),
        );
        assert_eq!(
            sets.required.iter().cloned().collect::<Vec<_>>(),
            vec!["python", "vertex ai"]
        );
        assert!(sets.preferred.contains("go"));
    }

    #[test]
    fn test_reply_terms_are_matchable_against_resume() {
        let tokenizer = Tokenizer::default();
        let sets = keywords_from_reply(r#"{"required": ["C++", "Python", ".NET"]}"#, &tokenizer);
        assert_eq!(
            sets.required.iter().cloned().collect::<Vec<_>>(),
            vec!["net", "python"]
        );

        let result = match_sets(
            "Senior C++ and .NET developer, Python scripting",
            &sets.required,
            &sets.preferred,
            &tokenizer,
        );
        assert!(result.missing_required.is_empty());
        assert_eq!(result.score(), 100.0);
    }

    #[test]
    fn test_reply_missing_list_defaults_empty() {
        let sets = keywords_from_reply(r#"{"required": ["SQL"]}"#, &Tokenizer::default());
        assert!(sets.required.contains("sql"));
        assert!(sets.preferred.is_empty());
    }

    #[test]
    fn test_reply_lists_are_capped() {
        let many: Vec<String> = (0..40).map(|i| format!("\"tool{i}\"")).collect();
        let reply = format!(r#"{{"required": [{}]}}"#, many.join(","));
        let sets = keywords_from_reply(&reply, &Tokenizer::default());
        assert_eq!(sets.required.len(), MAX_TERMS_PER_LIST);
    }

    #[test]
    fn test_malformed_reply_yields_empty_sets() {
        let tokenizer = Tokenizer::default();
        assert!(keywords_from_reply("not json at all", &tokenizer).is_empty());
        assert!(keywords_from_reply(r#"{"required": [1, 2]}"#, &tokenizer).is_empty());
        assert!(keywords_from_reply("", &tokenizer).is_empty());
    }
}
