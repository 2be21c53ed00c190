//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::pipeline::{analyze, require_text, AnalysisReport, KeywordResolver};
use crate::cache::cache_key;
use crate::errors::AppError;
use crate::keywords::source::KeywordOrigin;
use crate::matching::explicit::{match_keyword_specs, JdKeywords, SpecMatchReport};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub job_text: String,
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct KeywordSpecRequest {
    #[serde(default)]
    pub resume_text: String,
    pub jd: JdKeywords,
}

#[derive(Debug, Deserialize)]
pub struct ExtractKeywordsRequest {
    #[serde(default)]
    pub job_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractKeywordsResponse {
    pub required: Vec<String>,
    pub preferred: Vec<String>,
    pub keyword_source: KeywordOrigin,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EvictKeywordsResponse {
    pub deleted: bool,
}

fn resolver(state: &AppState) -> KeywordResolver<'_> {
    KeywordResolver {
        source: state.keyword_source.as_ref(),
        fallback: &state.keyword_builder,
        cache: state.cache.as_ref(),
        cache_ttl: state.config.cache_ttl,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Extracts required / preferred keywords from the job text, matches them
/// against the resume and returns the weighted score with the breakdown.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let report = analyze(
        &request.job_text,
        &request.resume_text,
        &resolver(&state),
        &state.tokenizer,
    )
    .await?;

    Ok(Json(report))
}

/// POST /api/v1/analyze/keywords
///
/// Checks caller-declared word / phrase keywords against the resume.
pub async fn handle_analyze_keyword_specs(
    State(state): State<AppState>,
    Json(request): Json<KeywordSpecRequest>,
) -> Result<Json<SpecMatchReport>, AppError> {
    require_text("resume_text", &request.resume_text)?;

    let report = match_keyword_specs(&request.resume_text, &request.jd, &state.tokenizer);

    Ok(Json(report))
}

/// POST /api/v1/keywords
///
/// Returns the keyword sets a job description resolves to, without matching.
pub async fn handle_extract_keywords(
    State(state): State<AppState>,
    Json(request): Json<ExtractKeywordsRequest>,
) -> Result<Json<ExtractKeywordsResponse>, AppError> {
    require_text("job_text", &request.job_text)?;

    let resolved = resolver(&state).resolve(&request.job_text).await;

    Ok(Json(ExtractKeywordsResponse {
        required: resolved.keywords.required.into_iter().collect(),
        preferred: resolved.keywords.preferred.into_iter().collect(),
        keyword_source: resolved.origin,
    }))
}

/// DELETE /api/v1/keywords
///
/// Evicts the cached keyword sets for a job description so the next request
/// extracts them again.
pub async fn handle_evict_keywords(
    State(state): State<AppState>,
    Json(request): Json<ExtractKeywordsRequest>,
) -> Result<Json<EvictKeywordsResponse>, AppError> {
    require_text("job_text", &request.job_text)?;

    let deleted = state.cache.delete(&cache_key(&request.job_text)).await;

    Ok(Json(EvictKeywordsResponse { deleted }))
}
