/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse config: {reason}")]
    Parse { reason: String },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("pipeline component not provided: {component}")]
    MissingComponent { component: String },
}
