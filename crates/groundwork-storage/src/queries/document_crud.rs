//! Document insert, update and lookup.

use std::collections::BTreeMap;

use groundwork_core::errors::StorageError;
use groundwork_core::Document;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::vector_search::{bytes_to_f32_vec, f32_vec_to_bytes};
use crate::to_storage_err;

pub(crate) const DOCUMENT_COLUMNS: &str =
    "id, filename, content, content_hash, metadata, embedding, dimensions";

/// Column values of one `documents` row before decoding.
pub(crate) struct RawDocumentRow {
    id: String,
    filename: String,
    content: String,
    content_hash: String,
    metadata: String,
    embedding: Option<Vec<u8>>,
    dimensions: Option<i64>,
}

impl RawDocumentRow {
    /// Read the columns listed in `DOCUMENT_COLUMNS`, in order, from `offset`.
    pub(crate) fn read(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            filename: row.get(offset + 1)?,
            content: row.get(offset + 2)?,
            content_hash: row.get(offset + 3)?,
            metadata: row.get(offset + 4)?,
            embedding: row.get(offset + 5)?,
            dimensions: row.get(offset + 6)?,
        })
    }

    pub(crate) fn into_document(self) -> Result<Document, StorageError> {
        let metadata: BTreeMap<String, String> = serde_json::from_str(&self.metadata)
            .map_err(|e| StorageError::Serialization {
                reason: format!("metadata of {}: {e}", self.id),
            })?;
        let embedding = match (self.embedding, self.dimensions) {
            (Some(blob), Some(dims)) => Some(bytes_to_f32_vec(&blob, dims as usize)),
            _ => None,
        };
        Ok(Document {
            id: self.id,
            filename: self.filename,
            content: self.content,
            content_hash: self.content_hash,
            embedding,
            metadata,
            similarity: None,
        })
    }

    pub(crate) fn dimensions(&self) -> Option<usize> {
        self.dimensions.map(|d| d as usize)
    }

    pub(crate) fn embedding_blob(&self) -> Option<&[u8]> {
        self.embedding.as_deref()
    }
}

fn metadata_json(metadata: &BTreeMap<String, String>) -> Result<String, StorageError> {
    serde_json::to_string(metadata).map_err(|e| StorageError::Serialization {
        reason: e.to_string(),
    })
}

/// Insert a fully-formed document. The caller guarantees the hash is new.
pub fn insert_document(conn: &Connection, doc: &Document) -> Result<(), StorageError> {
    let blob = doc.embedding.as_deref().map(f32_vec_to_bytes);
    let dims = doc.embedding.as_ref().map(|e| e.len() as i64);
    conn.execute(
        "INSERT INTO documents
            (id, filename, content, content_hash, metadata, embedding, dimensions, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            doc.id,
            doc.filename,
            doc.content,
            doc.content_hash,
            metadata_json(&doc.metadata)?,
            blob,
            dims,
            chrono::Utc::now().to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert {}: {e}", doc.filename)))?;
    Ok(())
}

/// Replace content, hash, metadata and embedding of the row currently
/// stored under `old_hash`. Returns false when no such row exists.
pub fn replace_document(
    conn: &Connection,
    old_hash: &str,
    doc: &Document,
) -> Result<bool, StorageError> {
    let blob = doc.embedding.as_deref().map(f32_vec_to_bytes);
    let dims = doc.embedding.as_ref().map(|e| e.len() as i64);
    let changed = conn
        .execute(
            "UPDATE documents
             SET content = ?1, content_hash = ?2, metadata = ?3, embedding = ?4, dimensions = ?5
             WHERE content_hash = ?6",
            params![
                doc.content,
                doc.content_hash,
                metadata_json(&doc.metadata)?,
                blob,
                dims,
                old_hash,
            ],
        )
        .map_err(|e| to_storage_err(format!("update {old_hash}: {e}")))?;
    Ok(changed > 0)
}

pub fn get_by_hash(conn: &Connection, content_hash: &str) -> Result<Option<Document>, StorageError> {
    let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE content_hash = ?1");
    let raw = conn
        .query_row(&sql, params![content_hash], |row| RawDocumentRow::read(row, 0))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawDocumentRow::into_document).transpose()
}

pub fn count(conn: &Connection) -> Result<usize, StorageError> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as usize)
}
