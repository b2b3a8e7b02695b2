use serde::Serialize;

use crate::profile::Profile;

/// One entry of the final match list.
///
/// Serialized with the response field names: `score` is the vector similarity,
/// `llmScore` and `llmScoreExplanation` come from the re-ranker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub id: String,
    #[serde(rename = "score")]
    pub vector_score: Option<f64>,
    pub profile: Profile,
    #[serde(rename = "llmScore")]
    pub llm_score: f32,
    #[serde(rename = "llmScoreExplanation")]
    pub llm_explanation: String,
}

impl MatchResult {
    /// Returns `true` if the LLM score reaches `threshold`.
    pub fn passes(&self, threshold: f32) -> bool {
        self.llm_score >= threshold
    }
}
