use super::GenerationError;

/// Failure of an advisory judgment call (rewrite, HyDE, follow-up query,
/// faithfulness judge, regeneration, aggressive compression).
///
/// Callers always pick a safe default; these never reach the pipeline caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum JudgmentError {
    #[error("judge unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("judge timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("malformed judge output: {reason}")]
    Malformed { reason: String },

    #[error("judge returned an empty response")]
    Empty,
}

impl From<GenerationError> for JudgmentError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Timeout { timeout_ms } => Self::Timeout { timeout_ms },
            other => Self::Unavailable {
                reason: other.to_string(),
            },
        }
    }
}
