use async_trait::async_trait;

use crate::errors::EmbeddingError;

/// Text → fixed-length vector. Deterministic for identical input within a model version.
#[async_trait]
pub trait IEmbedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
