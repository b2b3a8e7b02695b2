use thiserror::Error;

use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum RerankError {
    /// The model answered with no content at all.
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// The content (or the completion envelope) was not the expected JSON.
    #[error("LLM response could not be parsed: {reason}")]
    InvalidResponse { reason: String },

    /// The chat request could not be built.
    #[error("failed to build LLM request: {reason}")]
    Request { reason: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
