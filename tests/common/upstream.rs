//! In-process stand-in for every external collaborator.
//!
//! One axum server plays the profile store (PostgREST tables + similarity
//! RPCs), the embedding provider and the chat-completion LLM.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone, PartialEq)]
pub struct RpcCall {
    pub procedure: String,
    pub match_count: u64,
    pub dim: usize,
}

#[derive(Debug, Clone)]
pub struct PatchCall {
    pub table: String,
    pub filter: String,
    pub body: Value,
}

struct Inner {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    rpc_rows: Mutex<HashMap<String, Vec<Value>>>,
    embedding_dim: Mutex<usize>,
    embedding_delay: Mutex<Duration>,
    chat_content: Mutex<String>,
    embedding_inputs: Mutex<Vec<String>>,
    rpc_calls: Mutex<Vec<RpcCall>>,
    chat_prompts: Mutex<Vec<String>>,
    patches: Mutex<Vec<PatchCall>>,
}

#[derive(Clone)]
pub struct FakeUpstream {
    inner: Arc<Inner>,
}

impl Default for FakeUpstream {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                tables: Mutex::new(HashMap::new()),
                rpc_rows: Mutex::new(HashMap::new()),
                embedding_dim: Mutex::new(256),
                embedding_delay: Mutex::new(Duration::ZERO),
                chat_content: Mutex::new("[]".to_string()),
                embedding_inputs: Mutex::new(Vec::new()),
                rpc_calls: Mutex::new(Vec::new()),
                chat_prompts: Mutex::new(Vec::new()),
                patches: Mutex::new(Vec::new()),
            }),
        }
    }
}

impl FakeUpstream {
    pub fn insert_row(&self, table: &str, row: Value) {
        self.inner
            .tables
            .lock()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    pub fn set_rpc_rows(&self, procedure: &str, rows: Vec<Value>) {
        self.inner
            .rpc_rows
            .lock()
            .insert(procedure.to_string(), rows);
    }

    pub fn set_embedding_delay(&self, delay: Duration) {
        *self.inner.embedding_delay.lock() = delay;
    }

    pub fn set_embedding_dim(&self, dim: usize) {
        *self.inner.embedding_dim.lock() = dim;
    }

    pub fn set_chat_content(&self, content: impl Into<String>) {
        *self.inner.chat_content.lock() = content.into();
    }

    pub fn embedding_inputs(&self) -> Vec<String> {
        self.inner.embedding_inputs.lock().clone()
    }

    pub fn rpc_calls(&self) -> Vec<RpcCall> {
        self.inner.rpc_calls.lock().clone()
    }

    pub fn chat_prompts(&self) -> Vec<String> {
        self.inner.chat_prompts.lock().clone()
    }

    pub fn patches(&self) -> Vec<PatchCall> {
        self.inner.patches.lock().clone()
    }

    /// Serves the fake on an ephemeral port and returns its base URL.
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/rest/v1/rpc/{procedure}", post(rpc))
            .route("/rest/v1/{table}", get(select_rows).patch(patch_row))
            .route("/v1/embeddings", post(embeddings))
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(self.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind fake upstream");
        let addr = listener.local_addr().expect("fake upstream addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{addr}")
    }
}

fn ids_from_filter(filter: &str) -> Vec<String> {
    if let Some(id) = filter.strip_prefix("eq.") {
        return vec![id.to_string()];
    }
    filter
        .strip_prefix("in.(")
        .and_then(|rest| rest.strip_suffix(')'))
        .map(|list| {
            list.split(',')
                .map(|id| id.trim().trim_matches('"').to_string())
                .collect()
        })
        .unwrap_or_default()
}

async fn select_rows(
    State(fake): State<FakeUpstream>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let wanted = params
        .get("id")
        .map(|f| ids_from_filter(f))
        .unwrap_or_default();
    let tables = fake.inner.tables.lock();
    let rows: Vec<Value> = tables
        .get(&table)
        .map(|rows| {
            rows.iter()
                .filter(|row| {
                    row["id"]
                        .as_str()
                        .is_some_and(|id| wanted.iter().any(|w| w == id))
                })
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(Value::Array(rows))
}

async fn patch_row(
    State(fake): State<FakeUpstream>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> StatusCode {
    fake.inner.patches.lock().push(PatchCall {
        table,
        filter: params.get("id").cloned().unwrap_or_default(),
        body,
    });
    StatusCode::NO_CONTENT
}

async fn rpc(
    State(fake): State<FakeUpstream>,
    Path(procedure): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let match_count = body["match_count"].as_u64().unwrap_or_default();
    let dim = body["query_embedding"]
        .as_array()
        .map(Vec::len)
        .unwrap_or_default();
    fake.inner.rpc_calls.lock().push(RpcCall {
        procedure: procedure.clone(),
        match_count,
        dim,
    });

    let rows: Vec<Value> = fake
        .inner
        .rpc_rows
        .lock()
        .get(&procedure)
        .map(|rows| rows.iter().take(match_count as usize).cloned().collect())
        .unwrap_or_default();
    Json(Value::Array(rows))
}

async fn embeddings(State(fake): State<FakeUpstream>, Json(body): Json<Value>) -> Json<Value> {
    let input = body["input"].as_str().unwrap_or_default().to_string();
    fake.inner.embedding_inputs.lock().push(input.clone());

    let delay = *fake.inner.embedding_delay.lock();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let dim = *fake.inner.embedding_dim.lock();
    let seed = input.len() as f32;
    let vector: Vec<f32> = (0..dim).map(|i| ((i as f32 + seed) % 97.0) / 97.0).collect();
    Json(json!({
        "object": "list",
        "data": [{ "object": "embedding", "index": 0, "embedding": vector }],
        "model": body["model"],
    }))
}

async fn chat_completions(State(fake): State<FakeUpstream>, Json(body): Json<Value>) -> Json<Value> {
    let prompt = body["messages"][1]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    fake.inner.chat_prompts.lock().push(prompt);

    let content = fake.inner.chat_content.lock().clone();
    Json(json!({
        "id": "chatcmpl-fake",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": body["model"],
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2 }
    }))
}
