//! Weighted match score. Required terms count twice as much as preferred ones.

const REQUIRED_WEIGHT: usize = 2;
const PREFERRED_WEIGHT: usize = 1;

/// `100 * (2*matched_required + matched_preferred) / (2*required + preferred)`,
/// rounded to two decimals. Zero when there is nothing to match.
pub fn compute_score(
    required: usize,
    preferred: usize,
    matched_required: usize,
    matched_preferred: usize,
) -> f64 {
    let total = REQUIRED_WEIGHT * required + PREFERRED_WEIGHT * preferred;
    if total == 0 {
        return 0.0;
    }
    let got = REQUIRED_WEIGHT * matched_required + PREFERRED_WEIGHT * matched_preferred;
    round2(100.0 * got as f64 / total as f64).clamp(0.0, 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
