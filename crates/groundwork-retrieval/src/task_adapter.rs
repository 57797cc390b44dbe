//! Query type → retrieval and generation knobs. Pure table lookup.

use groundwork_core::models::{CompressionMode, GenerationParams, RetrievalParams, TaskConfig};
use groundwork_core::{QueryType, RetrievalStrategy};
use tracing::debug;

pub const FACTUAL_QA: TaskConfig = TaskConfig {
    retrieval_k: 5,
    rerank: true,
    citation_required: true,
    temperature: 0.1,
    strategy: RetrievalStrategy::Hybrid,
    memory_weight: 0.3,
    max_tokens: 300,
    compression: CompressionMode::Moderate,
};

pub const CONVERSATIONAL: TaskConfig = TaskConfig {
    retrieval_k: 3,
    rerank: false,
    citation_required: false,
    temperature: 0.7,
    strategy: RetrievalStrategy::Dense,
    memory_weight: 0.7,
    max_tokens: 400,
    compression: CompressionMode::None,
};

pub const MULTI_HOP: TaskConfig = TaskConfig {
    retrieval_k: 10,
    rerank: true,
    citation_required: true,
    temperature: 0.3,
    strategy: RetrievalStrategy::Hybrid,
    memory_weight: 0.4,
    max_tokens: 500,
    compression: CompressionMode::Moderate,
};

pub const SUMMARIZATION: TaskConfig = TaskConfig {
    retrieval_k: 20,
    rerank: true,
    citation_required: true,
    temperature: 0.3,
    strategy: RetrievalStrategy::Hybrid,
    memory_weight: 0.2,
    max_tokens: 600,
    compression: CompressionMode::Aggressive,
};

pub const CLARIFICATION: TaskConfig = TaskConfig {
    retrieval_k: 3,
    rerank: false,
    citation_required: false,
    temperature: 0.5,
    strategy: RetrievalStrategy::Dense,
    memory_weight: 0.8,
    max_tokens: 200,
    compression: CompressionMode::None,
};

/// Used for the meta types, which never retrieve.
pub const DEFAULT: TaskConfig = TaskConfig {
    retrieval_k: 5,
    rerank: true,
    citation_required: true,
    temperature: 0.7,
    strategy: RetrievalStrategy::Hybrid,
    memory_weight: 0.5,
    max_tokens: 300,
    compression: CompressionMode::Moderate,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TaskAdapter;

impl TaskAdapter {
    pub fn adapt(&self, query_type: QueryType) -> TaskConfig {
        let config = match query_type {
            QueryType::FactualQa => FACTUAL_QA,
            QueryType::Conversational => CONVERSATIONAL,
            QueryType::MultiHop => MULTI_HOP,
            QueryType::Summarization => SUMMARIZATION,
            QueryType::Clarification => CLARIFICATION,
            QueryType::Greeting | QueryType::OutOfScope => DEFAULT,
        };
        debug!(
            query_type = query_type.as_str(),
            k = config.retrieval_k,
            rerank = config.rerank,
            strategy = config.strategy.as_str(),
            temperature = config.temperature,
            "task config adapted"
        );
        config
    }

    pub fn retrieval_params(&self, query_type: QueryType) -> RetrievalParams {
        self.adapt(query_type).retrieval_params()
    }

    pub fn generation_params(&self, query_type: QueryType) -> GenerationParams {
        self.adapt(query_type).generation_params()
    }
}
