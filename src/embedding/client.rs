use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{Embedder, EmbeddingError, validate_embedding};
use crate::config::EmbeddingConfig;
use crate::upstream::{self, decode_json};

const SERVICE: &str = "embedding";

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

/// Embedder backed by an OpenAI-compatible `/embeddings` endpoint.
#[derive(Clone)]
pub struct HttpEmbedder {
    http: reqwest::Client,
    config: EmbeddingConfig,
    budget: Duration,
}

impl std::fmt::Debug for HttpEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEmbedder")
            .field("url", &self.config.url)
            .field("model", &self.config.model)
            .field("min_dim", &self.config.min_dim)
            .field("budget", &self.budget)
            .finish()
    }
}

impl HttpEmbedder {
    pub fn new(http: reqwest::Client, config: EmbeddingConfig, budget: Duration) -> Self {
        Self {
            http,
            config,
            budget,
        }
    }

    pub fn min_dim(&self) -> usize {
        self.config.min_dim
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    #[instrument(skip(self, text), fields(text_len = text.len(), model = %self.config.model))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let request = self
            .http
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .json(&EmbeddingRequest {
                model: &self.config.model,
                input: text,
            });

        let body = upstream::execute(SERVICE, request, self.budget).await?;
        let response: Value = decode_json(SERVICE, &body)?;

        let vector = extract_vector(&response)?;
        validate_embedding(&vector, self.config.min_dim)?;

        debug!(dim = vector.len(), "Embedding received");
        Ok(vector)
    }
}

/// Pulls the vector out of `{"data":[{"embedding":[..]}]}` or a bare `{"embedding":[..]}`.
pub(crate) fn extract_vector(response: &Value) -> Result<Vec<f32>, EmbeddingError> {
    let raw = response
        .pointer("/data/0/embedding")
        .or_else(|| response.get("embedding"))
        .and_then(Value::as_array)
        .ok_or_else(|| EmbeddingError::InvalidEmbedding {
            reason: "response contained no embedding vector".to_string(),
        })?;

    raw.iter()
        .enumerate()
        .map(|(idx, v)| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| EmbeddingError::InvalidEmbedding {
                    reason: format!("non-numeric value at index {idx}"),
                })
        })
        .collect()
}
