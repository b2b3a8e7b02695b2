use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::profile::fields::{
    CANDIDATE_ID_ALIASES, SIMILARITY_SCORE_ALIASES, resolve_id, resolve_score,
};

/// A candidate surfaced by similarity search, not yet confirmed relevant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    pub id: String,
    /// Similarity reported by the store, if any. Used as a tiebreak only.
    pub similarity_score: Option<f64>,
}

impl MatchCandidate {
    pub fn new(id: impl Into<String>, similarity_score: Option<f64>) -> Self {
        Self {
            id: id.into(),
            similarity_score,
        }
    }

    /// Resolves a raw search row; `None` if no string id can be found.
    pub fn from_row(row: &Value) -> Option<Self> {
        let obj = row.as_object()?;
        let id = resolve_id(obj, CANDIDATE_ID_ALIASES)?;
        Some(Self {
            id,
            similarity_score: resolve_score(obj, SIMILARITY_SCORE_ALIASES),
        })
    }
}

/// Converts raw rows into candidates, preserving row order.
///
/// Rows without a resolvable id are dropped. A repeated id keeps its first
/// (nearest) occurrence.
pub fn normalize_candidates(rows: Vec<Value>) -> Vec<MatchCandidate> {
    let total = rows.len();
    let mut seen = std::collections::HashSet::new();
    let candidates: Vec<MatchCandidate> = rows
        .iter()
        .filter_map(MatchCandidate::from_row)
        .filter(|c| seen.insert(c.id.clone()))
        .collect();

    if candidates.len() < total {
        warn!(
            dropped = total - candidates.len(),
            "Similarity rows without a usable id (or duplicated) were dropped"
        );
    }
    candidates
}
