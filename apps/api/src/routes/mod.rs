pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::documents::handlers::handle_upload_resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/health/cache", get(health::cache_health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyze/keywords",
            post(handlers::handle_analyze_keyword_specs),
        )
        .route(
            "/api/v1/keywords",
            post(handlers::handle_extract_keywords).delete(handlers::handle_evict_keywords),
        )
        // Uploads
        .route(
            "/api/v1/upload/resume",
            post(handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
