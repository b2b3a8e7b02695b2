use thiserror::Error;

use crate::upstream::UpstreamError;

/// Errors returned by similarity search.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The procedure answered with something other than a list of rows.
    #[error("unexpected similarity search response: {reason}")]
    UnexpectedShape { reason: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
