use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobmatch-api"
    }))
}

/// GET /health/cache
/// Pings the keyword cache and reports its server counters. 503 when it is
/// configured but unreachable; `stats` is null when caching is disabled.
pub async fn cache_health_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let status = state
        .cache
        .ping()
        .await
        .map_err(|e| AppError::ServiceUnavailable(format!("Cache connection failed: {e}")))?;

    let stats = match state.cache.stats().await {
        Ok(stats) => stats,
        Err(e) => {
            warn!("Could not read cache stats: {e}");
            None
        }
    };
    let hit_rate = stats.as_ref().and_then(|s| s.hit_rate());

    Ok(Json(json!({
        "status": "healthy",
        "cache": status,
        "stats": stats,
        "hit_rate": hit_rate,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
