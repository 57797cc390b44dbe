//! # groundwork-observability
//!
//! Structured tracing setup, named log events for every degradation path in
//! the pipeline, span definitions per stage, and an in-memory query log.

pub mod query_log;
pub mod tracing_setup;

pub use query_log::{QueryLog, QueryLogEntry, QueryLogSummary};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
