//! Orchestrator: runs one match request through every stage, in order.
//!
//! own profile → embedding text → embedding → similarity search → hydration
//! → LLM re-rank → ranking. Each stage awaits the previous one; any failure
//! aborts the request and no partial results are returned.

mod error;
pub mod request;


pub use error::MatchError;
pub use request::{MatchRequest, MatchResponse};

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::Config;
use crate::embedding::{Embedder, HttpEmbedder, validate_embedding};
use crate::hydration::CandidateHydrator;
use crate::profile::build_embedding_text;
use crate::rerank::{ChatModel, LlmReranker, OpenAiChatModel};
use crate::scoring::rank_candidates;
use crate::store::{ProfileStore, RestProfileStore};
use crate::vectordb::{RpcSimilaritySearch, SimilaritySearch, VectorRetriever};

/// The external collaborators a pipeline runs against.
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn ProfileStore>,
    pub embedder: Arc<dyn Embedder>,
    pub search: Arc<dyn SimilaritySearch>,
    pub chat: Arc<dyn ChatModel>,
}

impl Collaborators {
    /// HTTP-backed collaborators sharing one connection pool.
    pub fn from_config(config: &Config, http: reqwest::Client) -> Self {
        let timeouts = config.timeouts;
        Self {
            store: Arc::new(RestProfileStore::new(
                http.clone(),
                config.store.clone(),
                timeouts.profile,
                timeouts.hydrate,
            )),
            embedder: Arc::new(HttpEmbedder::new(
                http.clone(),
                config.embedding.clone(),
                timeouts.embedding,
            )),
            search: Arc::new(RpcSimilaritySearch::new(
                http.clone(),
                config.store.clone(),
                timeouts.search,
            )),
            chat: Arc::new(OpenAiChatModel::new(http, config.llm.clone(), timeouts.llm)),
        }
    }
}

#[derive(Clone)]
pub struct MatchPipeline {
    store: Arc<dyn ProfileStore>,
    embedder: Arc<dyn Embedder>,
    retriever: VectorRetriever,
    hydrator: CandidateHydrator,
    reranker: LlmReranker,
    min_dim: usize,
}

impl std::fmt::Debug for MatchPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchPipeline")
            .field("min_dim", &self.min_dim)
            .finish_non_exhaustive()
    }
}

impl MatchPipeline {
    pub fn new(collaborators: Collaborators, min_dim: usize) -> Self {
        let Collaborators {
            store,
            embedder,
            search,
            chat,
        } = collaborators;
        Self {
            hydrator: CandidateHydrator::new(store.clone()),
            retriever: VectorRetriever::new(search),
            reranker: LlmReranker::new(chat),
            store,
            embedder,
            min_dim,
        }
    }

    pub fn store(&self) -> Arc<dyn ProfileStore> {
        self.store.clone()
    }

    pub fn embedder(&self) -> Arc<dyn Embedder> {
        self.embedder.clone()
    }

    pub fn min_dim(&self) -> usize {
        self.min_dim
    }

    #[instrument(
        skip(self, request),
        fields(requester_id = %request.requester_id, role = %request.role, limit = request.limit)
    )]
    pub async fn run(&self, request: &MatchRequest) -> Result<MatchResponse, MatchError> {
        let caller = request.role;
        let target = caller.opposite();

        let own = self
            .store
            .fetch_profile(caller, &request.requester_id)
            .await?
            .ok_or_else(|| MatchError::NotFound {
                role: caller.as_str(),
                id: request.requester_id.clone(),
            })?;

        let ask = build_embedding_text(&own.attributes, caller.attribute_schema(), &request.prompt);

        let embedding = self.embedder.embed(&ask).await?;
        validate_embedding(&embedding, self.min_dim)?;

        let candidates = self
            .retriever
            .retrieve(caller, &embedding, request.limit)
            .await?;
        let retrieved = candidates.len();

        let hydrated = self.hydrator.hydrate(target, candidates).await?;
        let scores = self.reranker.rerank(target, &ask, &hydrated).await?;
        let scored = scores.len();

        let results = rank_candidates(hydrated, scores);

        info!(
            retrieved,
            scored,
            returned = results.len(),
            "Match pipeline complete"
        );
        Ok(MatchResponse::new(request.requester_id.clone(), results))
    }
}
