use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use super::{ProfileStore, StoreError};
use crate::config::StoreConfig;
use crate::profile::{Profile, Role};
use crate::upstream::{self, decode_json};

const SERVICE: &str = "profile store";

/// Profile store over a PostgREST-style REST endpoint.
#[derive(Clone)]
pub struct RestProfileStore {
    http: reqwest::Client,
    config: StoreConfig,
    lookup_budget: Duration,
    batch_budget: Duration,
}

impl std::fmt::Debug for RestProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestProfileStore")
            .field("url", &self.config.url)
            .field("lookup_budget", &self.lookup_budget)
            .field("batch_budget", &self.batch_budget)
            .finish()
    }
}

impl RestProfileStore {
    pub fn new(
        http: reqwest::Client,
        config: StoreConfig,
        lookup_budget: Duration,
        batch_budget: Duration,
    ) -> Self {
        Self {
            http,
            config,
            lookup_budget,
            batch_budget,
        }
    }

    fn table_url(&self, role: Role) -> String {
        format!("{}/{}", self.config.url.trim_end_matches('/'), role.table())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
    }

    fn parse_rows(body: &str) -> Result<Vec<Profile>, StoreError> {
        let rows: Value = decode_json(SERVICE, body)?;
        let Value::Array(rows) = rows else {
            return Err(StoreError::UnexpectedShape {
                reason: "expected a JSON array of rows".to_string(),
            });
        };

        let total = rows.len();
        let profiles: Vec<Profile> = rows.into_iter().filter_map(Profile::from_row).collect();
        if profiles.len() < total {
            warn!(
                dropped = total - profiles.len(),
                "Profile rows without an id were ignored"
            );
        }
        Ok(profiles)
    }
}

/// Renders an `in.(...)` filter with every id double-quoted.
pub(crate) fn in_filter(ids: &[String]) -> String {
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("in.({})", quoted.join(","))
}

#[async_trait]
impl ProfileStore for RestProfileStore {
    #[instrument(skip(self), fields(table = role.table()))]
    async fn fetch_profile(&self, role: Role, id: &str) -> Result<Option<Profile>, StoreError> {
        let request = self.authorize(self.http.get(self.table_url(role)).query(&[
            ("select", "*".to_string()),
            ("id", format!("eq.{id}")),
            ("limit", "1".to_string()),
        ]));

        let body = upstream::execute(SERVICE, request, self.lookup_budget).await?;
        let profile = Self::parse_rows(&body)?.into_iter().next();

        debug!(found = profile.is_some(), "Profile lookup complete");
        Ok(profile)
    }

    #[instrument(skip(self, ids), fields(table = role.table(), requested = ids.len()))]
    async fn fetch_profiles(
        &self,
        role: Role,
        ids: &[String],
    ) -> Result<Vec<Profile>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let request = self.authorize(
            self.http
                .get(self.table_url(role))
                .query(&[("select", "*".to_string()), ("id", in_filter(ids))]),
        );

        let body = upstream::execute(SERVICE, request, self.batch_budget).await?;
        let profiles = Self::parse_rows(&body)?;

        debug!(returned = profiles.len(), "Batch profile lookup complete");
        Ok(profiles)
    }

    #[instrument(skip(self, embedding, embedding_text), fields(table = role.table(), dim = embedding.len()))]
    async fn update_embedding(
        &self,
        role: Role,
        id: &str,
        embedding: &[f32],
        embedding_text: &str,
    ) -> Result<(), StoreError> {
        let request = self.authorize(
            self.http
                .patch(self.table_url(role))
                .query(&[("id", format!("eq.{id}"))])
                .header("Prefer", "return=minimal")
                .json(&json!({
                    "embedding": embedding,
                    "embedding_text": embedding_text,
                })),
        );

        upstream::execute(SERVICE, request, self.lookup_budget).await?;
        Ok(())
    }
}
