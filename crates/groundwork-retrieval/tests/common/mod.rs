#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use groundwork_core::config::{EmbeddingConfig, RetrievalConfig};
use groundwork_core::traits::{ILexicalSearch, IVectorSearch};
use groundwork_embeddings::EmbeddingEngine;
use groundwork_retrieval::{DenseRetriever, HybridRetriever, RetrieverPool, SparseRetriever};
use test_fixtures::StubEmbedder;

pub const SEARCH_TIMEOUT: Duration = Duration::from_millis(200);

pub fn engine() -> Arc<EmbeddingEngine> {
    let config = EmbeddingConfig {
        dimensions: 5,
        max_retries: 1,
        ..Default::default()
    };
    Arc::new(EmbeddingEngine::new(Arc::new(StubEmbedder::new()), &config))
}

pub struct Parts {
    pub engine: Arc<EmbeddingEngine>,
    pub dense: Arc<DenseRetriever>,
    pub sparse: Arc<SparseRetriever>,
    pub hybrid: Arc<HybridRetriever>,
}

pub fn parts(vector: Arc<dyn IVectorSearch>, lexical: Arc<dyn ILexicalSearch>) -> Parts {
    let engine = engine();
    let dense = Arc::new(DenseRetriever::new(engine.clone(), vector, SEARCH_TIMEOUT));
    let sparse = Arc::new(SparseRetriever::new(lexical, SEARCH_TIMEOUT));
    let hybrid = Arc::new(HybridRetriever::new(
        dense.clone(),
        sparse.clone(),
        &RetrievalConfig::default(),
    ));
    Parts {
        engine,
        dense,
        sparse,
        hybrid,
    }
}

pub fn pool(vector: Arc<dyn IVectorSearch>, lexical: Arc<dyn ILexicalSearch>) -> RetrieverPool {
    let p = parts(vector, lexical);
    RetrieverPool::new(p.dense, p.sparse, p.hybrid)
}
