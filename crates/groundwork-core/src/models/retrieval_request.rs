use serde::{Deserialize, Serialize};

use super::MetadataFilters;

/// Parameters shared by every retrieval strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalRequest {
    pub query: String,
    pub top_k: usize,
    /// Dense results must score strictly above this.
    pub threshold: f64,
    #[serde(default)]
    pub metadata_filters: MetadataFilters,
    /// Allow the embedding cache. Must be false for non-idempotent queries.
    pub use_cache: bool,
}

impl RetrievalRequest {
    pub fn new(query: impl Into<String>, top_k: usize, threshold: f64) -> Self {
        Self {
            query: query.into(),
            top_k,
            threshold,
            metadata_filters: MetadataFilters::new(),
            use_cache: true,
        }
    }

    pub fn with_filters(mut self, filters: MetadataFilters) -> Self {
        self.metadata_filters = filters;
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }

    /// Same parameters against a different query text.
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self.clone()
        }
    }

    pub fn with_top_k(&self, top_k: usize) -> Self {
        Self {
            top_k,
            ..self.clone()
        }
    }
}
