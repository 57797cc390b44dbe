use serde::{Deserialize, Serialize};

use crate::query::RetrievalStrategy;

/// How hard the context compressor squeezes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionMode {
    None,
    Moderate,
    Aggressive,
}

/// Per-query-type knob bundle. Pure lookup data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub retrieval_k: usize,
    pub rerank: bool,
    pub citation_required: bool,
    pub temperature: f32,
    pub strategy: RetrievalStrategy,
    pub memory_weight: f32,
    pub max_tokens: u32,
    pub compression: CompressionMode,
}

/// Retrieval-side projection of a `TaskConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetrievalParams {
    pub top_k: usize,
    pub rerank: bool,
    pub strategy: RetrievalStrategy,
}

/// Generation-side projection of a `TaskConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub citation_required: bool,
    pub compression: CompressionMode,
}

impl TaskConfig {
    pub fn retrieval_params(&self) -> RetrievalParams {
        RetrievalParams {
            top_k: self.retrieval_k,
            rerank: self.rerank,
            strategy: self.strategy,
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            citation_required: self.citation_required,
            compression: self.compression,
        }
    }
}
