mod document;
mod generation_request;
mod hallucination;
mod message;
mod query_analysis;
mod retrieval_request;
mod task_config;
mod validated_answer;

pub use document::{Document, MetadataFilters};
pub use generation_request::GenerationRequest;
pub use hallucination::HallucinationAssessment;
pub use message::{Message, Role};
pub use query_analysis::QueryAnalysis;
pub use retrieval_request::RetrievalRequest;
pub use task_config::{CompressionMode, GenerationParams, RetrievalParams, TaskConfig};
pub use validated_answer::{GroundingResult, ValidatedAnswer};
