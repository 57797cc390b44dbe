//! # groundwork-storage
//!
//! Reference document store backing the vector and lexical search
//! capabilities: one `documents` table, an FTS5 index kept in sync by
//! triggers, and embeddings stored as little-endian f32 blobs.

pub mod migrations;
pub mod pragmas;
pub mod queries;
pub mod store;

pub use store::DocumentStore;

use groundwork_core::errors::StorageError;

pub(crate) fn to_storage_err(message: impl Into<String>) -> StorageError {
    StorageError::SqliteError {
        message: message.into(),
    }
}
