use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::{RetrievalError, SimilaritySearch};
use crate::config::StoreConfig;
use crate::upstream::{self, decode_json};

const SERVICE: &str = "similarity search";

#[derive(Serialize)]
struct MatchRequest<'a> {
    query_embedding: &'a [f32],
    match_count: usize,
}

/// Calls a stored similarity procedure at `{store_url}/rpc/{procedure}`.
#[derive(Clone)]
pub struct RpcSimilaritySearch {
    http: reqwest::Client,
    config: StoreConfig,
    budget: Duration,
}

impl std::fmt::Debug for RpcSimilaritySearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcSimilaritySearch")
            .field("url", &self.config.url)
            .field("budget", &self.budget)
            .finish()
    }
}

impl RpcSimilaritySearch {
    pub fn new(http: reqwest::Client, config: StoreConfig, budget: Duration) -> Self {
        Self {
            http,
            config,
            budget,
        }
    }

    fn rpc_url(&self, procedure: &str) -> String {
        format!(
            "{}/rpc/{}",
            self.config.url.trim_end_matches('/'),
            procedure
        )
    }
}

#[async_trait]
impl SimilaritySearch for RpcSimilaritySearch {
    #[instrument(skip(self, query_embedding), fields(dim = query_embedding.len()))]
    async fn search(
        &self,
        procedure: &str,
        query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<Value>, RetrievalError> {
        let request = self
            .http
            .post(self.rpc_url(procedure))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .json(&MatchRequest {
                query_embedding,
                match_count,
            });

        let body = upstream::execute(SERVICE, request, self.budget).await?;
        match decode_json::<Value>(SERVICE, &body)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            _ => Err(RetrievalError::UnexpectedShape {
                reason: "expected a JSON array of matches".to_string(),
            }),
        }
    }
}
