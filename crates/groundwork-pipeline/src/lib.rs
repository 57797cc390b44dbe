//! # groundwork-pipeline
//!
//! Wires the router, retriever pool, reranker, compressor, generator and
//! validator into one request lifecycle. [`PipelineBuilder`] constructs the
//! services explicitly; [`Pipeline::run`] answers a query and
//! [`Pipeline::run_stream`] does the same while streaming events.

pub mod builder;
pub mod pipeline;
pub mod prompts;
pub mod request;
pub mod state;

pub use builder::PipelineBuilder;
pub use pipeline::Pipeline;
pub use request::{PipelineEvent, RunRequest, RunResponse};
pub use state::{GenerationOutcome, RequestState};
