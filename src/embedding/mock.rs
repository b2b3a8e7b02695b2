use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Embedder, EmbeddingError, validate_embedding};
use crate::constants::DEFAULT_EMBEDDING_MIN_DIM;

/// Deterministic embedder: the same text always yields the same vector.
pub struct MockEmbedder {
    dim: usize,
    min_dim: usize,
    calls: Mutex<Vec<String>>,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_MIN_DIM * 2)
    }
}

impl MockEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            min_dim: DEFAULT_EMBEDDING_MIN_DIM,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Texts passed to [`Embedder::embed`], in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let seed = text
            .bytes()
            .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        (0..self.dim as u64)
            .map(|i| {
                let mixed = (seed.wrapping_mul(31).wrapping_add(i)) % 1000;
                mixed as f32 / 1000.0
            })
            .collect()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.lock().push(text.to_string());
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }
        let vector = self.vector_for(text);
        validate_embedding(&vector, self.min_dim)?;
        Ok(vector)
    }
}
