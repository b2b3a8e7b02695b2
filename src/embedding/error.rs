use thiserror::Error;

use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding input is empty")]
    EmptyInput,

    #[error("invalid embedding: {reason}")]
    InvalidEmbedding { reason: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
