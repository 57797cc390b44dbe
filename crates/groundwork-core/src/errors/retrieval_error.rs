use super::{EmbeddingError, StorageError};

/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("{stage} timed out after {timeout_ms}ms")]
    Timeout { stage: String, timeout_ms: u64 },

    #[error("ranking failed: {reason}")]
    RankingFailed { reason: String },

    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("document store error: {0}")]
    Storage(#[from] StorageError),
}
