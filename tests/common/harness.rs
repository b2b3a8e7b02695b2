//! Test server harness.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use speakermatch::config::{Config, EmbeddingConfig, LlmConfig, StoreConfig, Timeouts};
use speakermatch::gateway::{AppState, create_router};
use speakermatch::pipeline::{Collaborators, MatchPipeline};

use super::upstream::FakeUpstream;

pub struct TestServer {
    pub addr: SocketAddr,
    pub upstream: FakeUpstream,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn post(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}{}", self.url(), path))
            .json(&body)
            .send()
            .await
            .expect("request to test server")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Budgets small enough that a stalled fake fails a test quickly.
pub fn fast_timeouts() -> Timeouts {
    Timeouts {
        profile: Duration::from_secs(2),
        embedding: Duration::from_secs(2),
        search: Duration::from_secs(2),
        hydrate: Duration::from_secs(2),
        llm: Duration::from_secs(2),
    }
}

pub fn config_for(upstream_url: &str, timeouts: Timeouts) -> Config {
    Config {
        port: 0,
        bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
        store: StoreConfig {
            url: format!("{upstream_url}/rest/v1"),
            api_key: "store-key".to_string(),
        },
        embedding: EmbeddingConfig {
            url: format!("{upstream_url}/v1/embeddings"),
            api_key: "embedding-key".to_string(),
            model: "text-embedding-3-small".to_string(),
            min_dim: 100,
        },
        llm: LlmConfig {
            url: format!("{upstream_url}/v1/chat/completions"),
            api_key: "llm-key".to_string(),
            model: "gpt-4o-mini".to_string(),
        },
        timeouts,
    }
}

/// Spawns the real router wired to HTTP collaborators that all point at `upstream`.
pub async fn spawn_test_server(upstream: FakeUpstream, timeouts: Timeouts) -> TestServer {
    let upstream_url = upstream.spawn().await;
    let config = config_for(&upstream_url, timeouts);
    config.validate().expect("test config is valid");

    let pipeline = MatchPipeline::new(
        Collaborators::from_config(&config, reqwest::Client::new()),
        config.embedding.min_dim,
    );
    let app = create_router(AppState::new(pipeline));

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("test server addr");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    TestServer {
        addr,
        upstream,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    }
}
