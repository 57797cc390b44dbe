use async_trait::async_trait;

use crate::models::{Document, RetrievalRequest};

/// One retrieval strategy. Never fails: internal errors log and yield an empty list.
#[async_trait]
pub trait IRetriever: Send + Sync {
    async fn retrieve(&self, request: &RetrievalRequest) -> Vec<Document>;

    fn name(&self) -> &'static str;
}
