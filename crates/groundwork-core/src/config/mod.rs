//! Layered configuration: TOML file → struct defaults → environment for secrets.

pub mod defaults;

mod compression_config;
mod embedding_config;
mod generation_config;
mod observability_config;
mod retrieval_config;
mod router_config;
mod storage_config;
mod subject_config;
mod validation_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use compression_config::CompressionConfig;
pub use embedding_config::EmbeddingConfig;
pub use generation_config::GenerationConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use router_config::{FilterTerm, RouterConfig};
pub use storage_config::StorageConfig;
pub use subject_config::SubjectConfig;
pub use validation_config::ValidationConfig;

use crate::errors::ConfigError;

/// Root configuration. Every section falls back to its defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundworkConfig {
    pub subject: SubjectConfig,
    pub router: RouterConfig,
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub generation: GenerationConfig,
    pub compression: CompressionConfig,
    pub validation: ValidationConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl GroundworkConfig {
    /// Parse from a TOML string. An empty string yields all defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&source)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// API key for the generation endpoint: config value, then
    /// `GROUNDWORK_API_KEY`, then `OPENAI_API_KEY`.
    pub fn generation_api_key(&self) -> Option<String> {
        self.generation.api_key.clone().or_else(env_api_key)
    }

    /// API key for the embeddings endpoint, resolved the same way.
    pub fn embedding_api_key(&self) -> Option<String> {
        self.embedding.api_key.clone().or_else(env_api_key)
    }

    /// Reject values that would make a stage meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.retrieval.similarity_threshold) {
            return Err(invalid(
                "retrieval.similarity_threshold",
                "must be within [0, 1]",
            ));
        }
        if self.retrieval.rrf_k == 0 {
            return Err(invalid("retrieval.rrf_k", "must be positive"));
        }
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be positive"));
        }
        if self.compression.context_max_tokens == 0 {
            return Err(invalid("compression.context_max_tokens", "must be positive"));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(invalid("generation.temperature", "must be within [0, 2]"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn env_api_key() -> Option<String> {
    std::env::var(defaults::ENV_API_KEY)
        .or_else(|_| std::env::var(defaults::ENV_OPENAI_API_KEY))
        .ok()
        .filter(|k| !k.trim().is_empty())
}
