use axum::http::StatusCode;
use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::rerank::RerankError;
use crate::store::StoreError;
use crate::upstream::UpstreamError;
use crate::vectordb::RetrievalError;

/// Every way a match request can fail.
///
/// Only [`MatchError::Validation`] is the caller's fault; everything else
/// aborts the request and surfaces as a 500.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{0}")]
    Validation(String),

    #[error("{role} profile '{id}' not found")]
    NotFound { role: &'static str, id: String },

    #[error("{service} returned HTTP {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} call timed out after {budget_ms}ms")]
    Timeout {
        service: &'static str,
        budget_ms: u128,
    },

    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    #[error("{service} returned an unexpected response: {reason}")]
    UnexpectedResponse {
        service: &'static str,
        reason: String,
    },

    #[error("invalid embedding: {0}")]
    InvalidEmbedding(String),

    #[error("LLM response error: {0}")]
    LlmResponse(String),
}

impl MatchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MatchError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MatchError::Validation(_) => "validation",
            MatchError::NotFound { .. } => "not_found",
            MatchError::Upstream { .. } => "upstream",
            MatchError::Timeout { .. } => "timeout",
            MatchError::Transport { .. } => "transport",
            MatchError::UnexpectedResponse { .. } => "unexpected_response",
            MatchError::InvalidEmbedding(_) => "invalid_embedding",
            MatchError::LlmResponse(_) => "llm_response",
        }
    }
}

impl From<UpstreamError> for MatchError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout { service, budget } => MatchError::Timeout {
                service,
                budget_ms: budget.as_millis(),
            },
            UpstreamError::Status {
                service,
                status,
                body,
            } => MatchError::Upstream {
                service,
                status,
                body,
            },
            UpstreamError::Transport { service, message } => {
                MatchError::Transport { service, message }
            }
            UpstreamError::Decode { service, message } => MatchError::UnexpectedResponse {
                service,
                reason: message,
            },
        }
    }
}

impl From<EmbeddingError> for MatchError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::Upstream(e) => e.into(),
            EmbeddingError::EmptyInput => {
                MatchError::InvalidEmbedding("embedding input is empty".to_string())
            }
            EmbeddingError::InvalidEmbedding { reason } => MatchError::InvalidEmbedding(reason),
        }
    }
}

impl From<StoreError> for MatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Upstream(e) => e.into(),
            StoreError::UnexpectedShape { reason } => MatchError::UnexpectedResponse {
                service: "profile store",
                reason,
            },
        }
    }
}

impl From<RetrievalError> for MatchError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::Upstream(e) => e.into(),
            RetrievalError::UnexpectedShape { reason } => MatchError::UnexpectedResponse {
                service: "similarity search",
                reason,
            },
        }
    }
}

impl From<RerankError> for MatchError {
    fn from(err: RerankError) -> Self {
        match err {
            RerankError::Upstream(e) => e.into(),
            other => MatchError::LlmResponse(other.to_string()),
        }
    }
}
