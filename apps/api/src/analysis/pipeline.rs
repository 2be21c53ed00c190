//! The job-vs-resume analysis pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::{cache_key, KeywordCache};
use crate::errors::AppError;
use crate::keywords::builder::{KeywordSetBuilder, KeywordSets};
use crate::keywords::source::{KeywordOrigin, KeywordSource};
use crate::matching::matcher::match_sets;
use crate::text::normalize::clean_job_text;
use crate::text::tokenize::Tokenizer;

/// Collaborators needed to turn a raw job description into keyword sets.
pub struct KeywordResolver<'a> {
    pub source: &'a dyn KeywordSource,
    pub fallback: &'a KeywordSetBuilder,
    pub cache: &'a dyn KeywordCache,
    pub cache_ttl: Duration,
}

/// Keyword sets plus the path that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedKeywords {
    pub keywords: KeywordSets,
    pub origin: KeywordOrigin,
}

/// Full analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub match_score: f64,
    pub required: Vec<String>,
    pub preferred: Vec<String>,
    pub matched_required: Vec<String>,
    pub matched_preferred: Vec<String>,
    pub missing_required: Vec<String>,
    pub missing_preferred: Vec<String>,
    pub keyword_source: KeywordOrigin,
}

impl KeywordResolver<'_> {
    /// Cache hit → cached sets. Otherwise the source runs on the cleaned text;
    /// if a non-local source returns nothing, the local pipeline is used.
    /// Only non-empty results from the configured source are cached, so a
    /// fallback result never shadows a later successful source call.
    pub async fn resolve(&self, job_text: &str) -> ResolvedKeywords {
        let key = cache_key(job_text);

        if let Some(keywords) = self.cache.get(&key).await {
            return ResolvedKeywords {
                keywords,
                origin: KeywordOrigin::Cache,
            };
        }

        let cleaned = clean_job_text(job_text);
        let configured = self.source.origin();
        let mut origin = configured;
        let mut keywords = self.source.extract(&cleaned).await;

        if keywords.is_empty() && origin != KeywordOrigin::Local {
            info!("Keyword source {:?} returned nothing, using local extraction", origin);
            keywords = self.fallback.build_keyword_sets(&cleaned);
            origin = KeywordOrigin::Local;
        }

        if keywords.is_empty() {
            debug!("No keywords extractable from job text");
        } else if origin == configured {
            self.cache.set(&key, &keywords, self.cache_ttl).await;
        } else {
            debug!("Not caching {:?} fallback result", origin);
        }

        ResolvedKeywords { keywords, origin }
    }
}

/// Rejects blank input with `EmptyInput` naming the offending field.
pub fn require_text(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::EmptyInput(field));
    }
    Ok(())
}

/// Matches resolved keywords against the resume and scores the result.
pub fn build_report(
    resume_text: &str,
    resolved: ResolvedKeywords,
    tokenizer: &Tokenizer,
) -> AnalysisReport {
    let ResolvedKeywords { keywords, origin } = resolved;
    let result = match_sets(resume_text, &keywords.required, &keywords.preferred, tokenizer);

    AnalysisReport {
        match_score: result.score(),
        required: keywords.required.into_iter().collect(),
        preferred: keywords.preferred.into_iter().collect(),
        matched_required: result.matched_required,
        matched_preferred: result.matched_preferred,
        missing_required: result.missing_required,
        missing_preferred: result.missing_preferred,
        keyword_source: origin,
    }
}

/// Validates input, resolves keywords and builds the report.
pub async fn analyze(
    job_text: &str,
    resume_text: &str,
    resolver: &KeywordResolver<'_>,
    tokenizer: &Tokenizer,
) -> Result<AnalysisReport, AppError> {
    require_text("job_text", job_text)?;
    require_text("resume_text", resume_text)?;

    let resolved = resolver.resolve(job_text).await;
    let report = build_report(resume_text, resolved, tokenizer);

    info!(
        "Analysis complete: score={} required={}/{} preferred={}/{} source={:?}",
        report.match_score,
        report.matched_required.len(),
        report.required.len(),
        report.matched_preferred.len(),
        report.preferred.len(),
        report.keyword_source
    );

    Ok(report)
}
