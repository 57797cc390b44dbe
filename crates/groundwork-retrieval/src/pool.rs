//! Strategy name → retriever dispatch.

use std::sync::Arc;

use groundwork_core::models::RetrievalRequest;
use groundwork_core::traits::IRetriever;
use groundwork_core::{Document, RetrievalStrategy};
use tracing::debug;

use crate::hybrid::HybridRetriever;
use crate::strategies::{DenseRetriever, HydeRetriever, SparseRetriever};

/// Holds one instance of every single-pass retriever.
///
/// `None`, `MultiHop` (the iterative loop lives in `MultiHopRetriever`) and
/// anything unavailable resolve to hybrid; HyDE without a generator
/// resolves to dense.
pub struct RetrieverPool {
    dense: Arc<DenseRetriever>,
    sparse: Arc<SparseRetriever>,
    hybrid: Arc<HybridRetriever>,
    hyde: Option<Arc<HydeRetriever>>,
}

impl RetrieverPool {
    pub fn new(
        dense: Arc<DenseRetriever>,
        sparse: Arc<SparseRetriever>,
        hybrid: Arc<HybridRetriever>,
    ) -> Self {
        Self {
            dense,
            sparse,
            hybrid,
            hyde: None,
        }
    }

    pub fn with_hyde(mut self, hyde: Arc<HydeRetriever>) -> Self {
        self.hyde = Some(hyde);
        self
    }

    pub fn dense(&self) -> Arc<DenseRetriever> {
        Arc::clone(&self.dense)
    }

    pub fn get(&self, strategy: RetrievalStrategy) -> Arc<dyn IRetriever> {
        match strategy {
            RetrievalStrategy::Dense => self.dense.clone(),
            RetrievalStrategy::Sparse => self.sparse.clone(),
            RetrievalStrategy::Hyde => match &self.hyde {
                Some(hyde) => hyde.clone(),
                None => self.dense.clone(),
            },
            RetrievalStrategy::Hybrid | RetrievalStrategy::MultiHop | RetrievalStrategy::None => {
                self.hybrid.clone()
            }
        }
    }

    pub async fn retrieve(
        &self,
        strategy: RetrievalStrategy,
        request: &RetrievalRequest,
    ) -> Vec<Document> {
        let retriever = self.get(strategy);
        debug!(
            requested = strategy.as_str(),
            resolved = retriever.name(),
            top_k = request.top_k,
            "dispatching retrieval"
        );
        retriever.retrieve(request).await
    }
}
