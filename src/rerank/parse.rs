//! Strict parsing of the re-ranker's JSON output.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::RerankError;
use crate::profile::fields::{
    LLM_EXPLANATION_ALIASES, LLM_ID_ALIASES, LLM_SCORE_ALIASES, resolve_id, resolve_score,
    resolve_text,
};

/// The model's verdict on one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmScore {
    pub candidate_id: String,
    /// Always within `[0, 1]`.
    pub score: f32,
    pub explanation: String,
}

/// Parses the model output into scores.
///
/// The content must be a JSON array, optionally wrapped in one Markdown code
/// fence. Elements that are not objects, have no resolvable id, or have no
/// numeric score are dropped. Scores are clamped to `[0, 1]`, a missing
/// explanation becomes `""`, and a repeated id keeps its first element.
pub fn parse_scores(content: &str) -> Result<Vec<LlmScore>, RerankError> {
    let body = strip_code_fence(content.trim());
    if body.is_empty() {
        return Err(RerankError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(body).map_err(|e| RerankError::InvalidResponse {
        reason: e.to_string(),
    })?;
    let Value::Array(items) = value else {
        return Err(RerankError::InvalidResponse {
            reason: "expected a JSON array".to_string(),
        });
    };

    let total = items.len();
    let mut seen = HashSet::new();
    let scores: Vec<LlmScore> = items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let candidate_id = resolve_id(obj, LLM_ID_ALIASES)?;
            let score = resolve_score(obj, LLM_SCORE_ALIASES)?;
            Some(LlmScore {
                candidate_id,
                score: (score as f32).clamp(0.0, 1.0),
                explanation: resolve_text(obj, LLM_EXPLANATION_ALIASES).unwrap_or_default(),
            })
        })
        .filter(|s| seen.insert(s.candidate_id.clone()))
        .collect();

    if scores.len() < total {
        warn!(
            dropped = total - scores.len(),
            kept = scores.len(),
            "Malformed or duplicate LLM score elements were dropped"
        );
    }
    Ok(scores)
}

/// Removes one surrounding ```` ``` ```` / ```` ```json ```` fence, if present.
pub(crate) fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return content;
    };
    let inner = inner.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    inner.trim()
}
