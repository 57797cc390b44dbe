use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Dense results must score strictly above this cosine similarity.
    pub similarity_threshold: f64,
    /// Top-k for the plain dense fallback path.
    pub default_top_k: usize,
    /// Candidates fetched before reranking.
    pub rerank_top_k: usize,
    pub dense_top_k: usize,
    pub sparse_top_k: usize,
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    pub enable_reranking: bool,
    pub multi_hop_max_hops: usize,
    pub multi_hop_per_hop_k: usize,
    pub multi_hop_final_k: usize,
    /// Bound on each vector/lexical search call.
    pub search_timeout_ms: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            default_top_k: defaults::DEFAULT_TOP_K,
            rerank_top_k: defaults::DEFAULT_RERANK_TOP_K,
            dense_top_k: defaults::DEFAULT_DENSE_TOP_K,
            sparse_top_k: defaults::DEFAULT_SPARSE_TOP_K,
            rrf_k: defaults::DEFAULT_RRF_K,
            enable_reranking: defaults::DEFAULT_ENABLE_RERANKING,
            multi_hop_max_hops: defaults::DEFAULT_MULTI_HOP_MAX_HOPS,
            multi_hop_per_hop_k: defaults::DEFAULT_MULTI_HOP_PER_HOP_K,
            multi_hop_final_k: defaults::DEFAULT_MULTI_HOP_FINAL_K,
            search_timeout_ms: defaults::DEFAULT_SEARCH_TIMEOUT_MS,
        }
    }
}
