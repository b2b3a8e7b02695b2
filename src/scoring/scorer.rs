use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use super::types::MatchResult;
use crate::constants::LLM_SCORE_THRESHOLD;
use crate::hydration::HydratedCandidate;
use crate::rerank::LlmScore;

/// Joins hydrated candidates with their LLM scores and keeps the relevant ones.
///
/// Candidates without a profile or without a score are dropped, as is any
/// entry scoring below [`LLM_SCORE_THRESHOLD`]. The rest are sorted by LLM
/// score, descending; ties keep `candidates` order.
pub fn rank_candidates(candidates: Vec<HydratedCandidate>, scores: Vec<LlmScore>) -> Vec<MatchResult> {
    let total = candidates.len();
    let mut by_id: HashMap<String, LlmScore> = HashMap::with_capacity(scores.len());
    for score in scores {
        by_id.entry(score.candidate_id.clone()).or_insert(score);
    }

    let mut results: Vec<MatchResult> = candidates
        .into_iter()
        .filter_map(|hydrated| {
            let profile = hydrated.profile?;
            let score = by_id.remove(&hydrated.candidate.id)?;
            Some(MatchResult {
                id: hydrated.candidate.id,
                vector_score: hydrated.candidate.similarity_score,
                profile,
                llm_score: score.score,
                llm_explanation: score.explanation,
            })
        })
        .filter(|result| result.passes(LLM_SCORE_THRESHOLD))
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| {
        b.llm_score
            .partial_cmp(&a.llm_score)
            .unwrap_or(Ordering::Equal)
    });

    debug!(
        candidates = total,
        kept = results.len(),
        threshold = LLM_SCORE_THRESHOLD,
        "Ranking complete"
    );
    results
}
