use async_trait::async_trait;

use crate::errors::RetrievalError;
use crate::models::{Document, MetadataFilters};

/// Ranked full-text search.
#[async_trait]
pub trait ILexicalSearch: Send + Sync {
    /// Documents matching every query term (AND), ordered by rank score
    /// descending with the score written to `similarity`.
    async fn search(
        &self,
        query_text: &str,
        top_k: usize,
        filters: &MetadataFilters,
    ) -> Result<Vec<Document>, RetrievalError>;
}
