//! Keyword cache keyed by a content hash of the raw job text.
//!
//! Cache failures are logged and degrade to a miss; they never fail a request.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::InfoDict;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::keywords::builder::KeywordSets;

const KEY_PREFIX: &str = "jobmatch:keywords:v1:";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStatus {
    Connected,
    Disabled,
}

/// Server-side counters reported by `/health/cache`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub connected_clients: u64,
    pub used_memory_human: String,
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
}

impl CacheStats {
    /// Hits over lookups, `None` before the first lookup.
    pub fn hit_rate(&self) -> Option<f64> {
        let lookups = self.keyspace_hits + self.keyspace_misses;
        (lookups > 0).then(|| self.keyspace_hits as f64 / lookups as f64)
    }
}

/// Cache key for a raw (uncleaned) job description.
pub fn cache_key(job_text: &str) -> String {
    format!("{KEY_PREFIX}{:x}", Sha256::digest(job_text.as_bytes()))
}

#[async_trait]
pub trait KeywordCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<KeywordSets>;

    /// Stores `value` for `ttl`. Returns whether the write succeeded.
    async fn set(&self, key: &str, value: &KeywordSets, ttl: Duration) -> bool;

    /// Evicts `key`. Returns whether an entry was removed.
    async fn delete(&self, key: &str) -> bool;

    async fn ping(&self) -> Result<CacheStatus, CacheError>;

    /// `None` when caching is disabled.
    async fn stats(&self) -> Result<Option<CacheStats>, CacheError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Redis
// ────────────────────────────────────────────────────────────────────────────

/// Redis-backed cache. One `ConnectionManager` is opened on first use and
/// shared by every request; it reconnects on its own after a dropped link.
pub struct RedisKeywordCache {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisKeywordCache {
    pub fn new(client: redis::Client) -> Self {
        info!("Redis keyword cache initialized");
        Self {
            client,
            conn: OnceCell::new(),
        }
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let conn = self
            .conn
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;
        Ok(conn.clone())
    }

    async fn try_get(&self, key: &str) -> Result<Option<KeywordSets>, CacheError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async::<_, Option<String>>(&mut conn)
            .await?;
        Ok(raw
            .map(|r| serde_json::from_str::<KeywordSets>(&r))
            .transpose()?)
    }

    async fn try_set(&self, key: &str, value: &KeywordSets, ttl: Duration) -> Result<(), CacheError> {
        let payload = serde_json::to_string(value)?;
        let mut conn = self.connection().await?;
        redis::cmd("SET")
            .arg(key)
            .arg(payload)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn try_delete(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.connection().await?;
        let removed = redis::cmd("DEL")
            .arg(key)
            .query_async::<_, u64>(&mut conn)
            .await?;
        Ok(removed > 0)
    }
}

#[async_trait]
impl KeywordCache for RedisKeywordCache {
    async fn get(&self, key: &str) -> Option<KeywordSets> {
        match self.try_get(key).await {
            Ok(Some(sets)) => {
                debug!("Cache hit for key: {key}");
                Some(sets)
            }
            Ok(None) => {
                debug!("Cache miss for key: {key}");
                None
            }
            Err(e) => {
                error!("Error reading cache for key {key}: {e}");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &KeywordSets, ttl: Duration) -> bool {
        match self.try_set(key, value, ttl).await {
            Ok(()) => {
                debug!("Cached keywords for key: {key}");
                true
            }
            Err(e) => {
                error!("Error writing cache for key {key}: {e}");
                false
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        match self.try_delete(key).await {
            Ok(removed) => {
                info!("Deleted cache for key: {key} (existed: {removed})");
                removed
            }
            Err(e) => {
                error!("Error deleting cache for key {key}: {e}");
                false
            }
        }
    }

    async fn ping(&self) -> Result<CacheStatus, CacheError> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await?;
        Ok(CacheStatus::Connected)
    }

    async fn stats(&self) -> Result<Option<CacheStats>, CacheError> {
        let mut conn = self.connection().await?;
        let info = redis::cmd("INFO")
            .query_async::<_, InfoDict>(&mut conn)
            .await?;

        Ok(Some(CacheStats {
            connected_clients: info.get("connected_clients").unwrap_or(0),
            used_memory_human: info
                .get("used_memory_human")
                .unwrap_or_else(|| "0B".to_string()),
            keyspace_hits: info.get("keyspace_hits").unwrap_or(0),
            keyspace_misses: info.get("keyspace_misses").unwrap_or(0),
        }))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Disabled cache (no REDIS_URL)
// ────────────────────────────────────────────────────────────────────────────

pub struct NoopCache;

#[async_trait]
impl KeywordCache for NoopCache {
    async fn get(&self, _key: &str) -> Option<KeywordSets> {
        None
    }

    async fn set(&self, _key: &str, _value: &KeywordSets, _ttl: Duration) -> bool {
        false
    }

    async fn delete(&self, _key: &str) -> bool {
        false
    }

    async fn ping(&self) -> Result<CacheStatus, CacheError> {
        Ok(CacheStatus::Disabled)
    }

    async fn stats(&self) -> Result<Option<CacheStats>, CacheError> {
        Ok(None)
    }
}
