//! Per-request state threaded through the stages.

use std::time::Instant;

use groundwork_core::models::{QueryAnalysis, TaskConfig};
use groundwork_core::{Document, MetadataFilters, RetrievalStrategy};

/// Output of the generate stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOutcome {
    pub text: String,
    pub chunks: usize,
    /// The stream receiver went away mid-generation.
    pub cancelled: bool,
}

/// Everything one request accumulates. Each stage fills its own field.
#[derive(Debug, Clone)]
pub struct RequestState {
    pub started: Instant,
    /// The query retrieval and generation use: the rewrite when present.
    pub query: String,
    pub analysis: QueryAnalysis,
    pub task: TaskConfig,
    pub filters: MetadataFilters,
    pub strategy: RetrievalStrategy,
    pub documents: Vec<Document>,
    pub outcome: Option<GenerationOutcome>,
}

impl RequestState {
    pub fn should_retrieve(&self) -> bool {
        self.analysis.should_retrieve()
    }
}
