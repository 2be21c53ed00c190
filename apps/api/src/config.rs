use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_MODEL;

const DEFAULT_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which keyword source the analysis pipeline asks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordSourceKind {
    Llm,
    Local,
}

impl FromStr for KeywordSourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "llm" => Ok(Self::Llm),
            "local" => Ok(Self::Local),
            other => bail!("KEYWORD_SOURCE must be 'llm' or 'local', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values; every variable has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Caching is disabled when unset.
    pub redis_url: Option<String>,
    pub cache_ttl: Duration,
    pub keyword_source: KeywordSourceKind,
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub llm_temperature: f32,
    /// Overall deadline for one LLM keyword extraction, retries included.
    pub llm_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let anthropic_api_key = get("ANTHROPIC_API_KEY");
        let keyword_source = match get("KEYWORD_SOURCE") {
            Some(raw) => raw.parse()?,
            None if anthropic_api_key.is_some() => KeywordSourceKind::Llm,
            None => KeywordSourceKind::Local,
        };

        Ok(Config {
            port: parse_or(&get, "PORT", 8080)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            redis_url: get("REDIS_URL"),
            cache_ttl: Duration::from_secs(parse_or(&get, "CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?),
            keyword_source,
            anthropic_api_key,
            llm_model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_temperature: parse_or(&get, "LLM_TEMPERATURE", 0.0)?,
            llm_timeout: Duration::from_secs(parse_or(&get, "LLM_TIMEOUT_SECS", 10)?),
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
