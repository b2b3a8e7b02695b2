use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{ProfileStore, StoreError};
use crate::profile::{Profile, Role};
use crate::upstream::UpstreamError;

/// Recorded `update_embedding` call.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingUpdate {
    pub role: Role,
    pub id: String,
    pub dim: usize,
    pub embedding_text: String,
}

/// In-memory profile store.
///
/// Batched lookups return rows in the reverse of the requested order so callers
/// cannot accidentally depend on storage order.
#[derive(Default)]
pub struct MockProfileStore {
    profiles: RwLock<HashMap<(Role, String), Profile>>,
    batch_calls: RwLock<Vec<Vec<String>>>,
    updates: RwLock<Vec<EmbeddingUpdate>>,
    failure_status: Option<u16>,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with HTTP `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            failure_status: Some(status),
            ..Self::default()
        }
    }

    pub fn insert(&self, role: Role, profile: Profile) {
        self.profiles
            .write()
            .insert((role, profile.id.clone()), profile);
    }

    /// Ids passed to each `fetch_profiles` call, in call order.
    pub fn batch_calls(&self) -> Vec<Vec<String>> {
        self.batch_calls.read().clone()
    }

    pub fn updates(&self) -> Vec<EmbeddingUpdate> {
        self.updates.read().clone()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure_status {
            Some(status) => Err(StoreError::Upstream(UpstreamError::Status {
                service: "profile store",
                status,
                body: "mock failure".to_string(),
            })),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileStore for MockProfileStore {
    async fn fetch_profile(&self, role: Role, id: &str) -> Result<Option<Profile>, StoreError> {
        self.check_failure()?;
        Ok(self.profiles.read().get(&(role, id.to_string())).cloned())
    }

    async fn fetch_profiles(
        &self,
        role: Role,
        ids: &[String],
    ) -> Result<Vec<Profile>, StoreError> {
        self.batch_calls.write().push(ids.to_vec());
        self.check_failure()?;

        let profiles = self.profiles.read();
        Ok(ids
            .iter()
            .rev()
            .filter_map(|id| profiles.get(&(role, id.clone())).cloned())
            .collect())
    }

    async fn update_embedding(
        &self,
        role: Role,
        id: &str,
        embedding: &[f32],
        embedding_text: &str,
    ) -> Result<(), StoreError> {
        self.check_failure()?;
        self.updates.write().push(EmbeddingUpdate {
            role,
            id: id.to_string(),
            dim: embedding.len(),
            embedding_text: embedding_text.to_string(),
        });
        Ok(())
    }
}
