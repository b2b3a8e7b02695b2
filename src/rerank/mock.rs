use async_trait::async_trait;
use parking_lot::Mutex;

use super::{ChatModel, RerankError};

/// Returns one canned completion and records every prompt it receives.
#[derive(Default)]
pub struct MockChatModel {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl MockChatModel {
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Responds with a JSON array scoring each `(id, score)` pair.
    pub fn with_scores(scores: &[(&str, f32)]) -> Self {
        let items: Vec<serde_json::Value> = scores
            .iter()
            .map(|(id, score)| {
                serde_json::json!({
                    "id": id,
                    "score": score,
                    "explanation": format!("mock verdict for {id}"),
                })
            })
            .collect();
        Self::with_response(serde_json::Value::Array(items).to_string())
    }

    /// User prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, RerankError> {
        self.prompts.lock().push(prompt.to_string());
        Ok(self.response.clone())
    }
}
