//! Speakermatch library crate (used by the server binary and integration tests).
//!
//! # Pipeline
//!
//! A match request flows through these stages, strictly in order:
//!
//! 1. [`profile`] - requester profile + ask → canonical embedding text
//! 2. [`embedding`] - text → vector
//! 3. [`vectordb`] - vector → nearest candidates of the opposite role
//! 4. [`hydration`] - candidate ids → full profile records
//! 5. [`rerank`] - one LLM call scores every hydrated candidate
//! 6. [`scoring`] - join, filter and sort into the final list
//!
//! [`pipeline::MatchPipeline`] runs them; [`gateway`] exposes it over HTTP.
//!
//! ## Test/Mock Support
//! Mock implementations of every external collaborator are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod hydration;
pub mod pipeline;
pub mod profile;
pub mod refresh;
pub mod rerank;
pub mod scoring;
pub mod store;
pub mod upstream;
pub mod vectordb;

#[cfg(test)]
mod testing;

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_EMBEDDING_MIN_DIM, DEFAULT_MATCH_LIMIT, LLM_SCORE_THRESHOLD, MAX_MATCH_LIMIT,
    MIN_MATCH_LIMIT, clamp_limit,
};
pub use embedding::{Embedder, EmbeddingError, HttpEmbedder, validate_embedding};
pub use gateway::{AppState, GatewayError, create_router};
pub use hydration::{CandidateHydrator, HydratedCandidate};
pub use pipeline::{Collaborators, MatchError, MatchPipeline, MatchRequest, MatchResponse};
pub use profile::{Profile, Role, build_embedding_text};
pub use refresh::{EmbeddingRefresher, RefreshOutcome};
pub use rerank::{ChatModel, LlmReranker, LlmScore, OpenAiChatModel, RerankError};
pub use scoring::{MatchResult, rank_candidates};
pub use store::{ProfileStore, RestProfileStore, StoreError};
pub use upstream::UpstreamError;
pub use vectordb::{
    MatchCandidate, RetrievalError, RpcSimilaritySearch, SimilaritySearch, VectorRetriever,
};

#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
#[cfg(any(test, feature = "mock"))]
pub use rerank::MockChatModel;
#[cfg(any(test, feature = "mock"))]
pub use store::MockProfileStore;
#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockSimilaritySearch;
