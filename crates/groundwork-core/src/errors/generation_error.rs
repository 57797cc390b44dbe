use serde::{Deserialize, Serialize};

/// User-facing error codes for a failed answer generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    QuotaExceeded,
    ApiError,
    Timeout,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuotaExceeded => "quota_exceeded",
            Self::ApiError => "api_error",
            Self::Timeout => "timeout",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text-generation capability errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("generation quota exceeded: {reason}")]
    QuotaExceeded { reason: String },

    #[error("generation API error (status {status:?}): {reason}")]
    Api { status: Option<u16>, reason: String },

    #[error("generation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("generator unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("internal generation error: {reason}")]
    Internal { reason: String },
}

impl GenerationError {
    /// The error code surfaced to the caller.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::QuotaExceeded { .. } => ErrorCode::QuotaExceeded,
            Self::Api { .. } | Self::Unavailable { .. } => ErrorCode::ApiError,
            Self::Timeout { .. } => ErrorCode::Timeout,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }
}
