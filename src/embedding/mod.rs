//! Embedding Client: text → vector via an external provider.
//!
//! - [`HttpEmbedder`] talks to an OpenAI-compatible `/embeddings` endpoint.
//! - [`MockEmbedder`] is a deterministic in-memory stand-in for tests.

pub mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::HttpEmbedder;
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;

use async_trait::async_trait;

/// Turns text into an embedding vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds `text`. Implementations fail on empty input and on vectors shorter
    /// than their configured floor.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Checks that `vector` is long enough and holds only finite values.
pub fn validate_embedding(vector: &[f32], min_dim: usize) -> Result<(), EmbeddingError> {
    if vector.len() < min_dim {
        return Err(EmbeddingError::InvalidEmbedding {
            reason: format!(
                "vector has {} dimensions, expected at least {}",
                vector.len(),
                min_dim
            ),
        });
    }
    if let Some(idx) = vector.iter().position(|v| !v.is_finite()) {
        return Err(EmbeddingError::InvalidEmbedding {
            reason: format!("non-finite value at index {idx}"),
        });
    }
    Ok(())
}
