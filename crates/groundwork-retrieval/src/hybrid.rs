//! Dense + sparse retrieval run concurrently and merged with RRF.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use groundwork_core::config::RetrievalConfig;
use groundwork_core::models::RetrievalRequest;
use groundwork_core::traits::IRetriever;
use groundwork_core::Document;
use groundwork_observability::tracing_setup::events;

use crate::fusion;
use crate::strategies::{DenseRetriever, SparseRetriever};

pub struct HybridRetriever {
    dense: Arc<DenseRetriever>,
    sparse: Arc<SparseRetriever>,
    dense_top_k: usize,
    sparse_top_k: usize,
    rrf_k: u32,
}

impl HybridRetriever {
    pub fn new(
        dense: Arc<DenseRetriever>,
        sparse: Arc<SparseRetriever>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            dense,
            sparse,
            dense_top_k: config.dense_top_k,
            sparse_top_k: config.sparse_top_k,
            rrf_k: config.rrf_k,
        }
    }
}

#[async_trait]
impl IRetriever for HybridRetriever {
    async fn retrieve(&self, request: &RetrievalRequest) -> Vec<Document> {
        let start = Instant::now();
        let dense_request = request.with_top_k(self.dense_top_k);
        let sparse_request = request.with_top_k(self.sparse_top_k);

        // Each side already degrades to an empty list on failure.
        let (dense, sparse) = tokio::join!(
            self.dense.retrieve(&dense_request),
            self.sparse.retrieve(&sparse_request),
        );

        let fused = fusion::fuse(&[dense, sparse], request.top_k, self.rrf_k);
        events::retrieval_completed(
            self.name(),
            fused.len(),
            start.elapsed().as_millis() as u64,
        );
        fused
    }

    fn name(&self) -> &'static str {
        "hybrid"
    }
}
