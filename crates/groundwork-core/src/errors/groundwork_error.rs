use super::{
    ConfigError, EmbeddingError, ErrorCode, GenerationError, JudgmentError, RetrievalError,
    StorageError,
};

/// Top-level error for the Groundwork pipeline.
///
/// Only `Generation` escapes a pipeline run; every other stage degrades
/// in place. The remaining variants surface from construction and storage APIs.
#[derive(Debug, thiserror::Error)]
pub enum GroundworkError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Judgment(#[from] JudgmentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl GroundworkError {
    /// Error code for the transport layer.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Generation(e) => e.code(),
            _ => ErrorCode::InternalError,
        }
    }
}

pub type GroundworkResult<T> = Result<T, GroundworkError>;
