//! HTTP failure → `GenerationError` classification.

use groundwork_core::errors::GenerationError;
use serde::Deserialize;

const INSUFFICIENT_QUOTA: &str = "insufficient_quota";

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Classify a non-2xx response.
///
/// 429 carrying `insufficient_quota` is a quota failure; everything else
/// is an API error with the status attached.
pub fn from_status(status: u16, body: &str) -> GenerationError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let reason = parsed
        .as_ref()
        .and_then(|e| e.error.message.clone())
        .unwrap_or_else(|| body.trim().to_string());

    let quota = parsed.as_ref().is_some_and(|e| {
        e.error.code.as_deref() == Some(INSUFFICIENT_QUOTA)
            || e.error.kind.as_deref() == Some(INSUFFICIENT_QUOTA)
    });

    if status == 429 && quota {
        GenerationError::QuotaExceeded { reason }
    } else {
        GenerationError::Api {
            status: Some(status),
            reason,
        }
    }
}

/// Classify a transport-level failure.
pub fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> GenerationError {
    if err.is_timeout() {
        GenerationError::Timeout { timeout_ms }
    } else if err.is_connect() {
        GenerationError::Unavailable {
            reason: err.to_string(),
        }
    } else {
        GenerationError::Api {
            status: err.status().map(|s| s.as_u16()),
            reason: err.to_string(),
        }
    }
}
