use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use groundwork_core::errors::RetrievalError;
use groundwork_core::models::RetrievalRequest;
use groundwork_core::traits::{IRetriever, IVectorSearch};
use groundwork_core::Document;
use groundwork_embeddings::EmbeddingEngine;
use groundwork_observability::tracing_setup::events;
use tracing::warn;

/// Embed the query, then nearest-neighbour search.
pub struct DenseRetriever {
    engine: Arc<EmbeddingEngine>,
    vector: Arc<dyn IVectorSearch>,
    search_timeout: Duration,
}

impl DenseRetriever {
    pub fn new(
        engine: Arc<EmbeddingEngine>,
        vector: Arc<dyn IVectorSearch>,
        search_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            vector,
            search_timeout,
        }
    }

    /// Fallible form of [`IRetriever::retrieve`].
    pub async fn try_retrieve(
        &self,
        request: &RetrievalRequest,
    ) -> Result<Vec<Document>, RetrievalError> {
        let vector = self
            .engine
            .embed_with_cache(&request.query, request.use_cache)
            .await?;

        tokio::time::timeout(
            self.search_timeout,
            self.vector.search(
                &vector,
                request.top_k,
                request.threshold,
                &request.metadata_filters,
            ),
        )
        .await
        .map_err(|_| RetrievalError::Timeout {
            stage: "vector_search".to_string(),
            timeout_ms: self.search_timeout.as_millis() as u64,
        })?
    }
}

#[async_trait]
impl IRetriever for DenseRetriever {
    async fn retrieve(&self, request: &RetrievalRequest) -> Vec<Document> {
        let start = Instant::now();
        match self.try_retrieve(request).await {
            Ok(docs) => {
                events::retrieval_completed(
                    self.name(),
                    docs.len(),
                    start.elapsed().as_millis() as u64,
                );
                docs
            }
            Err(e) => {
                warn!(strategy = self.name(), error = %e, "dense retrieval failed");
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "dense"
    }
}
