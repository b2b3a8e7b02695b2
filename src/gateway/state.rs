use std::sync::Arc;

use crate::pipeline::MatchPipeline;
use crate::refresh::EmbeddingRefresher;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<MatchPipeline>,

    pub refresher: EmbeddingRefresher,
}

impl AppState {
    /// The refresher shares the pipeline's store and embedder.
    pub fn new(pipeline: MatchPipeline) -> Self {
        let refresher =
            EmbeddingRefresher::new(pipeline.store(), pipeline.embedder(), pipeline.min_dim());
        Self {
            pipeline: Arc::new(pipeline),
            refresher,
        }
    }
}
