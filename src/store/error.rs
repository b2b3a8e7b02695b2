use thiserror::Error;

use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unexpected profile store response: {reason}")]
    UnexpectedShape { reason: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
