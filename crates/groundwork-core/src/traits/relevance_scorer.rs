use async_trait::async_trait;

use crate::errors::RetrievalError;

/// Pairwise (query, passage) relevance model, e.g. a cross-encoder.
#[async_trait]
pub trait IRelevanceScorer: Send + Sync {
    /// One score per passage, in input order. Higher is more relevant.
    async fn score(&self, query: &str, passages: &[String]) -> Result<Vec<f64>, RetrievalError>;

    fn name(&self) -> &str;
}
