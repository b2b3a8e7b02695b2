//! Background embedding refresh for stored profiles.
//!
//! After a profile is saved its stored embedding is stale. The refresh job
//! recomputes the profile's summary, embeds it and writes both back. It runs
//! detached; failures are logged and never reach the caller.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::embedding::{Embedder, validate_embedding};
use crate::pipeline::MatchError;
use crate::profile::Role;
use crate::store::ProfileStore;

/// What a refresh run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated { dim: usize },
    ProfileMissing,
}

#[derive(Clone)]
pub struct EmbeddingRefresher {
    store: Arc<dyn ProfileStore>,
    embedder: Arc<dyn Embedder>,
    min_dim: usize,
}

impl EmbeddingRefresher {
    pub fn new(store: Arc<dyn ProfileStore>, embedder: Arc<dyn Embedder>, min_dim: usize) -> Self {
        Self {
            store,
            embedder,
            min_dim,
        }
    }

    /// Recomputes and stores the embedding of one profile.
    #[instrument(skip(self))]
    pub async fn refresh(&self, role: Role, profile_id: &str) -> Result<RefreshOutcome, MatchError> {
        let Some(profile) = self.store.fetch_profile(role, profile_id).await? else {
            return Ok(RefreshOutcome::ProfileMissing);
        };

        let text = profile.summary(role);
        let embedding = self.embedder.embed(&text).await?;
        validate_embedding(&embedding, self.min_dim)?;

        self.store
            .update_embedding(role, profile_id, &embedding, &text)
            .await?;

        Ok(RefreshOutcome::Updated {
            dim: embedding.len(),
        })
    }

    /// Runs [`refresh`](Self::refresh) on a detached task; errors are logged and dropped.
    pub fn spawn_embedding_refresh(&self, role: Role, profile_id: String) -> JoinHandle<()> {
        let refresher = self.clone();
        tokio::spawn(async move {
            match refresher.refresh(role, &profile_id).await {
                Ok(RefreshOutcome::Updated { dim }) => {
                    info!(%role, profile_id = %profile_id, dim, "Profile embedding refreshed");
                }
                Ok(RefreshOutcome::ProfileMissing) => {
                    warn!(%role, profile_id = %profile_id, "Profile vanished before embedding refresh");
                }
                Err(e) => {
                    error!(%role, profile_id = %profile_id, kind = e.kind(), error = %e, "Embedding refresh failed");
                }
            }
        })
    }
}
