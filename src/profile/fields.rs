//! Field aliasing for loosely shaped JSON objects.
//!
//! Upstream rows name their identifier and score fields inconsistently. Each
//! lookup takes an ordered alias list and the first alias holding a non-null
//! value decides the outcome; later aliases are never consulted once one is
//! present.

use serde_json::{Map, Value};

/// Identifier aliases accepted on similarity-search rows, in priority order.
pub const CANDIDATE_ID_ALIASES: &[&str] = &["id", "profile_id", "speaker_id", "organizer_id"];

/// Score aliases accepted on similarity-search rows, in priority order.
pub const SIMILARITY_SCORE_ALIASES: &[&str] = &["similarity", "score", "similarity_score"];

/// Identifier aliases accepted on re-ranker output elements, in priority order.
pub const LLM_ID_ALIASES: &[&str] = &["id", "candidate_id", "candidateId"];

/// Score aliases accepted on re-ranker output elements, in priority order.
pub const LLM_SCORE_ALIASES: &[&str] = &["score", "llm_score", "llmScore"];

/// Explanation aliases accepted on re-ranker output elements, in priority order.
pub const LLM_EXPLANATION_ALIASES: &[&str] = &["explanation", "reason", "rationale"];

fn first_present<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|v| !v.is_null())
}

/// Resolves a string id. Integers are rendered as strings; blank strings and any
/// other JSON type resolve to `None`.
pub fn resolve_id(obj: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    match first_present(obj, aliases)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

/// Resolves a numeric score. Non-numeric values resolve to `None`.
pub fn resolve_score(obj: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    first_present(obj, aliases)?.as_f64()
}

/// Resolves a text field, `None` when absent or not a string.
pub fn resolve_text(obj: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    first_present(obj, aliases)?.as_str().map(str::to_string)
}
