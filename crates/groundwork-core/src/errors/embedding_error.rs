/// Embedding subsystem errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("embedding timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("embedding failed after {attempts} attempts: {reason}")]
    RetriesExhausted { attempts: u32, reason: String },
}
