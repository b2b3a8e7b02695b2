//! Vector Match Retriever: embedding → ranked candidate ids.
//!
//! The similarity procedure lives in the profile database (one per target
//! role). Its rows are loosely shaped, so [`model::normalize_candidates`]
//! resolves ids and scores through ordered alias lists before anything
//! downstream sees them.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::RpcSimilaritySearch;
pub use error::RetrievalError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockSimilaritySearch, SearchCall};
pub use model::{MatchCandidate, normalize_candidates};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::constants::MAX_MATCH_LIMIT;
use crate::profile::Role;

/// Raw nearest-neighbor search against a named similarity procedure.
#[async_trait]
pub trait SimilaritySearch: Send + Sync {
    /// Returns up to `match_count` raw rows, nearest first (advisory order).
    async fn search(
        &self,
        procedure: &str,
        query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<Value>, RetrievalError>;
}

/// Role-aware retriever over a [`SimilaritySearch`] backend.
#[derive(Clone)]
pub struct VectorRetriever {
    search: Arc<dyn SimilaritySearch>,
}

impl VectorRetriever {
    pub fn new(search: Arc<dyn SimilaritySearch>) -> Self {
        Self { search }
    }

    /// Finds up to `limit` candidates of the opposite role for a `caller_role` request.
    ///
    /// `limit` is capped at [`MAX_MATCH_LIMIT`] even if the caller forgot to clamp.
    #[instrument(skip(self, embedding), fields(procedure = caller_role.match_procedure(), dim = embedding.len()))]
    pub async fn retrieve(
        &self,
        caller_role: Role,
        embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<MatchCandidate>, RetrievalError> {
        let match_count = limit.clamp(1, MAX_MATCH_LIMIT);
        let rows = self
            .search
            .search(caller_role.match_procedure(), embedding, match_count)
            .await?;

        let total = rows.len();
        let candidates = normalize_candidates(rows);
        debug!(
            rows = total,
            candidates = candidates.len(),
            "Similarity search complete"
        );
        Ok(candidates)
    }
}
