use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use groundwork_core::errors::RetrievalError;
use groundwork_core::models::RetrievalRequest;
use groundwork_core::traits::{ILexicalSearch, IRetriever};
use groundwork_core::Document;
use groundwork_observability::tracing_setup::events;
use tracing::warn;

/// Full-text ranked search. `threshold` and `use_cache` do not apply.
pub struct SparseRetriever {
    lexical: Arc<dyn ILexicalSearch>,
    search_timeout: Duration,
}

impl SparseRetriever {
    pub fn new(lexical: Arc<dyn ILexicalSearch>, search_timeout: Duration) -> Self {
        Self {
            lexical,
            search_timeout,
        }
    }

    pub async fn try_retrieve(
        &self,
        request: &RetrievalRequest,
    ) -> Result<Vec<Document>, RetrievalError> {
        tokio::time::timeout(
            self.search_timeout,
            self.lexical
                .search(&request.query, request.top_k, &request.metadata_filters),
        )
        .await
        .map_err(|_| RetrievalError::Timeout {
            stage: "lexical_search".to_string(),
            timeout_ms: self.search_timeout.as_millis() as u64,
        })?
    }
}

#[async_trait]
impl IRetriever for SparseRetriever {
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
                warn!(strategy = self.name(), error = %e, "sparse retrieval failed");
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "sparse"
    }
}
