//! LLM Re-ranker: one chat call scores every hydrated candidate against the ask.
//!
//! Candidates whose profile did not hydrate are never sent to the model and
//! never scored. Each candidate is described by recomputing its canonical text
//! from the hydrated record with the candidate role's schema (see
//! [`Profile::summary`](crate::profile::Profile::summary)).

pub mod chat;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod parse;
pub mod prompt;


pub use chat::{ChatModel, OpenAiChatModel};
pub use error::RerankError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockChatModel;
pub use parse::{LlmScore, parse_scores};

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::hydration::HydratedCandidate;
use crate::profile::Role;

#[derive(Clone)]
pub struct LlmReranker {
    chat: Arc<dyn ChatModel>,
}

impl LlmReranker {
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }

    /// Scores the hydrated candidates of `target_role` against `ask`.
    ///
    /// Returns an empty list without calling the model when nothing hydrated.
    #[instrument(skip(self, ask, candidates), fields(target = %target_role, candidates = candidates.len()))]
    pub async fn rerank(
        &self,
        target_role: Role,
        ask: &str,
        candidates: &[HydratedCandidate],
    ) -> Result<Vec<LlmScore>, RerankError> {
        let described: Vec<(&str, String)> = candidates
            .iter()
            .filter_map(|c| {
                let profile = c.profile.as_ref()?;
                Some((c.id(), profile.summary(target_role)))
            })
            .collect();

        if described.is_empty() {
            debug!("No hydrated candidates to score");
            return Ok(Vec::new());
        }

        let prompt = prompt::build_rerank_prompt(target_role, ask, &described);
        let content = self.chat.complete(prompt::SYSTEM_INSTRUCTION, &prompt).await?;
        let scores = parse_scores(&content)?;

        debug!(
            scored = scores.len(),
            sent = described.len(),
            "Re-ranking complete"
        );
        Ok(scores)
    }
}
