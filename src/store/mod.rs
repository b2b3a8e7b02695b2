//! Profile store: point and batched lookups of role-scoped profile records.
//!
//! [`RestProfileStore`] speaks the PostgREST dialect (`?id=eq.x`, `?id=in.(..)`).

pub mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::RestProfileStore;
pub use error::StoreError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{EmbeddingUpdate, MockProfileStore};

use async_trait::async_trait;

use crate::profile::{Profile, Role};

/// Read/write access to stored profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Looks up one profile in `role`'s table; `Ok(None)` when it does not exist.
    async fn fetch_profile(&self, role: Role, id: &str) -> Result<Option<Profile>, StoreError>;

    /// Looks up many profiles in one call. Order of the result is unspecified and
    /// ids that no longer resolve are simply absent.
    async fn fetch_profiles(&self, role: Role, ids: &[String])
    -> Result<Vec<Profile>, StoreError>;

    /// Persists a freshly computed embedding and the text it was computed from.
    async fn update_embedding(
        &self,
        role: Role,
        id: &str,
        embedding: &[f32],
        embedding_text: &str,
    ) -> Result<(), StoreError>;
}
