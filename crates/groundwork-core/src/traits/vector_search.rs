use async_trait::async_trait;

use crate::errors::RetrievalError;
use crate::models::{Document, MetadataFilters};

/// Nearest-neighbour search over stored embeddings.
#[async_trait]
pub trait IVectorSearch: Send + Sync {
    /// Documents with cosine similarity strictly above `threshold`, containing
    /// every filter pair, ordered by similarity descending, at most `top_k`.
    async fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        threshold: f64,
        filters: &MetadataFilters,
    ) -> Result<Vec<Document>, RetrievalError>;
}
