/// Document store errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {message}")]
    SqliteError { message: String },

    #[error("migration v{version} failed: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    #[error("document not found: {content_hash}")]
    NotFound { content_hash: String },
}
