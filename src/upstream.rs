//! Shared plumbing for timed calls to external HTTP collaborators.
//!
//! Every outbound call goes through [`execute`], which applies the caller's
//! budget to the whole exchange (connect, send, body read) and classifies the
//! outcome. No call is retried.

use std::time::Duration;

use reqwest::RequestBuilder;
use thiserror::Error;
use tracing::debug;

use crate::constants::MAX_ERROR_BODY_BYTES;

/// Failure of a single outbound call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The call exceeded its budget and was aborted.
    #[error("{service} call timed out after {}ms", budget.as_millis())]
    Timeout {
        service: &'static str,
        budget: Duration,
    },

    /// The collaborator answered with a non-2xx status.
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Connection-level failure (DNS, refused, reset).
    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("{service} returned an unreadable response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout { .. })
    }

    pub fn service(&self) -> &'static str {
        match self {
            UpstreamError::Timeout { service, .. }
            | UpstreamError::Status { service, .. }
            | UpstreamError::Transport { service, .. }
            | UpstreamError::Decode { service, .. } => service,
        }
    }

    fn from_reqwest(service: &'static str, budget: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout { service, budget }
        } else if err.is_decode() {
            UpstreamError::Decode {
                service,
                message: err.to_string(),
            }
        } else {
            UpstreamError::Transport {
                service,
                message: err.without_url().to_string(),
            }
        }
    }
}

/// Sends `request` with `budget` applied and returns the body of a 2xx response.
pub async fn execute(
    service: &'static str,
    request: RequestBuilder,
    budget: Duration,
) -> Result<String, UpstreamError> {
    let response = request
        .timeout(budget)
        .send()
        .await
        .map_err(|e| UpstreamError::from_reqwest(service, budget, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| UpstreamError::from_reqwest(service, budget, e))?;

    debug!(
        service,
        status = status.as_u16(),
        body_len = body.len(),
        "Upstream call completed"
    );

    if !status.is_success() {
        return Err(UpstreamError::Status {
            service,
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

/// Parses a JSON body, mapping failures to [`UpstreamError::Decode`].
pub fn decode_json<T: serde::de::DeserializeOwned>(
    service: &'static str,
    body: &str,
) -> Result<T, UpstreamError> {
    serde_json::from_str(body).map_err(|e| UpstreamError::Decode {
        service,
        message: e.to_string(),
    })
}

/// Truncates an upstream body to [`MAX_ERROR_BODY_BYTES`] on a char boundary.
pub fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body_short_unchanged() {
        assert_eq!(truncate_body("nope"), "nope");
    }

    #[test]
    fn test_truncate_body_long_is_bounded() {
        let body = "x".repeat(MAX_ERROR_BODY_BYTES * 3);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.len(), MAX_ERROR_BODY_BYTES + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_body_respects_char_boundary() {
        let body = "é".repeat(MAX_ERROR_BODY_BYTES);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= MAX_ERROR_BODY_BYTES + 3);
    }

    #[test]
    fn test_timeout_display_includes_budget() {
        let err = UpstreamError::Timeout {
            service: "embedding",
            budget: Duration::from_millis(12_000),
        };
        assert_eq!(err.to_string(), "embedding call timed out after 12000ms");
        assert!(err.is_timeout());
        assert_eq!(err.service(), "embedding");
    }

    #[test]
    fn test_decode_json_error() {
        let err = decode_json::<serde_json::Value>("store", "{not json").unwrap_err();
        assert!(matches!(err, UpstreamError::Decode { service: "store", .. }));
    }
}
