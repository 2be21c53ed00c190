mod analysis;
mod cache;
mod config;
mod documents;
mod errors;
mod keywords;
mod llm_client;
mod matching;
mod routes;
mod state;
mod text;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::{KeywordCache, NoopCache, RedisKeywordCache};
use crate::config::{Config, KeywordSourceKind};
use crate::keywords::builder::KeywordSetBuilder;
use crate::keywords::sections::HeadingCues;
use crate::keywords::source::{KeywordSource, LlmKeywordSource, LocalKeywordSource};
use crate::llm_client::{LlmClient, LlmSettings};
use crate::routes::build_router;
use crate::state::AppState;
use crate::text::stopwords::Stopwords;
use crate::text::tokenize::Tokenizer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Text pipeline configuration, immutable from here on
    let stopwords = Arc::new(Stopwords::default());
    info!("Loaded {} stopwords", stopwords.len());
    let tokenizer = Tokenizer::new(stopwords);
    let keyword_builder = KeywordSetBuilder::new(tokenizer.clone(), HeadingCues::default());

    let cache = build_cache(&config)?;
    let keyword_source = build_keyword_source(&config, &keyword_builder)?;

    let state = AppState {
        config: config.clone(),
        tokenizer,
        keyword_builder,
        keyword_source,
        cache,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Redis when `REDIS_URL` is set, otherwise caching is disabled.
fn build_cache(config: &Config) -> Result<Arc<dyn KeywordCache>> {
    match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            Ok(Arc::new(RedisKeywordCache::new(client)))
        }
        None => {
            info!("REDIS_URL not set, keyword caching disabled");
            Ok(Arc::new(NoopCache))
        }
    }
}

fn build_keyword_source(
    config: &Config,
    keyword_builder: &KeywordSetBuilder,
) -> Result<Arc<dyn KeywordSource>> {
    match config.keyword_source {
        KeywordSourceKind::Local => {
            info!("Using local keyword extraction");
            Ok(Arc::new(LocalKeywordSource::new(keyword_builder.clone())))
        }
        KeywordSourceKind::Llm => {
            let client = config
                .anthropic_api_key
                .clone()
                .map(|api_key| {
                    LlmClient::new(LlmSettings {
                        api_key,
                        model: config.llm_model.clone(),
                        temperature: config.llm_temperature,
                        request_timeout: config.llm_timeout,
                    })
                })
                .transpose()?;
            if client.is_none() {
                tracing::warn!("KEYWORD_SOURCE=llm but ANTHROPIC_API_KEY is not set");
            }
            Ok(Arc::new(LlmKeywordSource::new(
                client,
                config.llm_timeout,
                keyword_builder.tokenizer().clone(),
            )))
        }
    }
}
