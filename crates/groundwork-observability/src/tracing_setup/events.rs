//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log the router's verdict on a query.
pub fn query_classified(query_type: &str, strategy: &str, rewritten: bool) {
    tracing::info!(
        event = "query_classified",
        query_type = %query_type,
        strategy = %strategy,
        rewritten = rewritten,
        "query classified"
    );
}

/// Log the outcome of a retrieval stage.
pub fn retrieval_completed(strategy: &str, document_count: usize, latency_ms: u64) {
    tracing::info!(
        event = "retrieval_completed",
        strategy = %strategy,
        document_count = document_count,
        latency_ms = latency_ms,
        "retrieval completed"
    );
}

/// Log a subsystem falling back to a lower-quality mode.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a judgment call that failed and was replaced by its safe default.
pub fn judgment_defaulted(judgment: &str, error: &str, default: &str) {
    tracing::warn!(
        event = "judgment_defaulted",
        judgment = %judgment,
        error = %error,
        default = %default,
        "judgment call failed, using default"
    );
}

/// Log a reranker falling back to similarity order.
pub fn rerank_fallback(scorer: &str, reason: &str, candidates: usize) {
    tracing::warn!(
        event = "rerank_fallback",
        scorer = %scorer,
        reason = %reason,
        candidates = candidates,
        "reranking unavailable, sorted by similarity"
    );
}

/// Log the context compressor dropping to a cheaper mode.
pub fn compression_fallback(from_mode: &str, to_mode: &str, reason: &str) {
    tracing::warn!(
        event = "compression_fallback",
        from_mode = %from_mode,
        to_mode = %to_mode,
        reason = %reason,
        "compression fell back"
    );
}

/// Log an unfaithful answer being regenerated.
pub fn answer_regenerated(missing_claims: usize, succeeded: bool) {
    tracing::info!(
        event = "answer_regenerated",
        missing_claims = missing_claims,
        succeeded = succeeded,
        "answer regenerated after faithfulness check"
    );
}

/// Log a terminal generation failure surfaced to the caller.
pub fn generation_failed(code: &str, error: &str) {
    tracing::error!(
        event = "generation_failed",
        code = %code,
        error = %error,
        "answer generation failed"
    );
}
