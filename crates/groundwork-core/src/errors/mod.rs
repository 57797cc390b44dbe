mod config_error;
mod embedding_error;
mod generation_error;
mod groundwork_error;
mod judgment_error;
mod retrieval_error;
mod storage_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use generation_error::{ErrorCode, GenerationError};
pub use groundwork_error::{GroundworkError, GroundworkResult};
pub use judgment_error::JudgmentError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;
