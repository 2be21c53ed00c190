// End-to-end analysis: resolve job keywords (cache → source → local fallback),
// match them against the resume, score the result.

pub mod handlers;
pub mod pipeline;
