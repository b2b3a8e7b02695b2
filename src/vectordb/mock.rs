use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{RetrievalError, SimilaritySearch};

/// Recorded similarity search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCall {
    pub procedure: String,
    pub dim: usize,
    pub match_count: usize,
}

/// Returns canned rows (truncated to `match_count`) and records every call.
#[derive(Default)]
pub struct MockSimilaritySearch {
    rows: Mutex<Vec<Value>>,
    calls: Mutex<Vec<SearchCall>>,
}

impl MockSimilaritySearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self {
            rows: Mutex::new(rows),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SimilaritySearch for MockSimilaritySearch {
    async fn search(
        &self,
        procedure: &str,
        query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<Value>, RetrievalError> {
        self.calls.lock().push(SearchCall {
            procedure: procedure.to_string(),
            dim: query_embedding.len(),
            match_count,
        });
        Ok(self.rows.lock().iter().take(match_count).cloned().collect())
    }
}
