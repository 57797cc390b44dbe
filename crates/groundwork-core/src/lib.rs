//! # groundwork-core
//!
//! Foundation crate for the Groundwork retrieval-and-grounding pipeline.
//! Defines the data model, the four capability traits the pipeline consumes
//! (embed, vector search, lexical search, generate), errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod query;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::GroundworkConfig;
pub use errors::{ErrorCode, GroundworkError, GroundworkResult, JudgmentError};
pub use models::{Document, GenerationRequest, Message, MetadataFilters, Role};
pub use query::{QueryType, RetrievalStrategy};
