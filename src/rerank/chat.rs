//! Chat-completion client used by the re-ranker.

use std::time::Duration;

use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

use super::RerankError;
use crate::config::LlmConfig;
use crate::upstream;

const SERVICE: &str = "llm";

/// Sampling temperature for re-ranking; scoring must be repeatable.
pub const RERANK_TEMPERATURE: f32 = 0.0;

/// A chat model that answers one system + user exchange with text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the assistant's text content; an absent content is `""`.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, RerankError>;
}

/// Chat model behind an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiChatModel {
    http: reqwest::Client,
    config: LlmConfig,
    budget: Duration,
}

impl std::fmt::Debug for OpenAiChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatModel")
            .field("url", &self.config.url)
            .field("model", &self.config.model)
            .field("budget", &self.budget)
            .finish()
    }
}

impl OpenAiChatModel {
    pub fn new(http: reqwest::Client, config: LlmConfig, budget: Duration) -> Self {
        Self {
            http,
            config,
            budget,
        }
    }

    pub(crate) fn build_request(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<CreateChatCompletionRequest, RerankError> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(system)
            .build()
            .map_err(request_error)?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(request_error)?;

        CreateChatCompletionRequestArgs::default()
            .model(self.config.model.clone())
            .temperature(RERANK_TEMPERATURE)
            .messages([
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .build()
            .map_err(request_error)
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    #[instrument(skip(self, system, prompt), fields(model = %self.config.model, prompt_len = prompt.len()))]
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, RerankError> {
        let request = self.build_request(system, prompt)?;

        let call = self
            .http
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .json(&request);
        let body = upstream::execute(SERVICE, call, self.budget).await?;

        let response: CreateChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| RerankError::InvalidResponse {
                reason: format!("malformed completion envelope: {e}"),
            })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!(content_len = content.len(), "LLM completion received");
        Ok(content)
    }
}

fn request_error(e: impl std::fmt::Display) -> RerankError {
    RerankError::Request {
        reason: e.to_string(),
    }
}
