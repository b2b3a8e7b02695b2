//! Cross-cutting, shared constants.
//!
//! Budgets and limits here are defaults; [`crate::config::Config`] can override
//! the per-call budgets and the embedding floor at startup.

use std::time::Duration;

/// Sanity floor for embedding dimensionality (`D_min`).
pub const DEFAULT_EMBEDDING_MIN_DIM: usize = 100;

/// Result count used when the request carries no `limit`.
pub const DEFAULT_MATCH_LIMIT: usize = 10;
/// Smallest accepted `limit`.
pub const MIN_MATCH_LIMIT: usize = 1;
/// Largest accepted `limit`; also the ceiling on similarity-search fan-out.
pub const MAX_MATCH_LIMIT: usize = 20;

/// Minimum LLM score for a candidate to survive ranking.
pub const LLM_SCORE_THRESHOLD: f32 = 0.5;

pub const DEFAULT_PROFILE_TIMEOUT: Duration = Duration::from_millis(6_000);
pub const DEFAULT_EMBEDDING_TIMEOUT: Duration = Duration::from_millis(12_000);
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_millis(6_000);
pub const DEFAULT_HYDRATE_TIMEOUT: Duration = Duration::from_millis(6_000);
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Upstream response bodies are truncated to this many bytes in errors and logs.
pub const MAX_ERROR_BODY_BYTES: usize = 512;

/// Key under which the free-text ask is appended to the embedding text.
pub const USER_PROMPT_KEY: &str = "user_prompt";

/// Clamps a requested result count into `[MIN_MATCH_LIMIT, MAX_MATCH_LIMIT]`.
///
/// `None` yields [`DEFAULT_MATCH_LIMIT`].
pub fn clamp_limit(requested: Option<i64>) -> usize {
    match requested {
        None => DEFAULT_MATCH_LIMIT,
        Some(n) => n.clamp(MIN_MATCH_LIMIT as i64, MAX_MATCH_LIMIT as i64) as usize,
    }
}
