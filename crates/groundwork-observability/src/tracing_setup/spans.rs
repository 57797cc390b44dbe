//! Span definitions per pipeline stage: request, retrieval, validation.

/// Create the per-request span.
#[macro_export]
macro_rules! pipeline_span {
    ($session_id:expr, $user_id:expr) => {
        tracing::info_span!("groundwork.pipeline", session_id = %$session_id, user_id = %$user_id)
    };
}

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($strategy:expr, $top_k:expr) => {
        tracing::info_span!("groundwork.retrieval", strategy = %$strategy, top_k = $top_k)
    };
}

/// Create a validation span.
#[macro_export]
macro_rules! validation_span {
    ($context_docs:expr) => {
        tracing::info_span!("groundwork.validation", context_docs = $context_docs)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PIPELINE: &str = "groundwork.pipeline";
    pub const RETRIEVAL: &str = "groundwork.retrieval";
    pub const VALIDATION: &str = "groundwork.validation";
}
