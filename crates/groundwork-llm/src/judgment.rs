//! Advisory generation calls: single attempt, bounded, never fatal.

use std::time::Duration;

use groundwork_core::errors::JudgmentError;
use groundwork_core::traits::IGenerator;
use groundwork_core::GenerationRequest;

/// Run one judgment call under `timeout` and return the trimmed reply.
///
/// Timeout, generator failure and blank output each map to a
/// `JudgmentError` so the caller can apply its default.
pub async fn judge(
    generator: &dyn IGenerator,
    request: &GenerationRequest,
    timeout: Duration,
) -> Result<String, JudgmentError> {
    let reply = tokio::time::timeout(timeout, generator.generate(request))
        .await
        .map_err(|_| JudgmentError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        })??;

    let reply = reply.trim();
    if reply.is_empty() {
        return Err(JudgmentError::Empty);
    }
    Ok(reply.to_string())
}
