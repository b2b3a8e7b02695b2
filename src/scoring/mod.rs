//! Ranking & Filter: merges re-ranker verdicts into the final result list.
//!
//! The LLM score is the only authoritative signal. Vector similarity is kept
//! for display and only decides order between equal LLM scores, through the
//! stable sort over retrieval order.

pub mod scorer;
pub mod types;

#[cfg(test)]
mod tests;

pub use scorer::rank_candidates;
pub use types::MatchResult;
