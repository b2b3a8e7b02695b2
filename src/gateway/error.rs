use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::pipeline::MatchError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Request body must be valid JSON: {0}")]
    InvalidJson(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Match(e) => e.status_code(),
            GatewayError::InvalidJson(_) | GatewayError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

/// Uniform failure envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            let kind = match &self {
                GatewayError::Match(e) => e.kind(),
                _ => "internal",
            };
            error!(status = status.as_u16(), kind, error = %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = Json(ErrorResponse {
            ok: false,
            error: message,
        });
        (status, body).into_response()
    }
}
