//! DocumentStore: connection ownership plus the search capability impls.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use groundwork_core::constants::{META_EMBEDDING_DIMENSION, META_EMBEDDING_MODEL};
use groundwork_core::errors::{RetrievalError, StorageError};
use groundwork_core::traits::{ILexicalSearch, IVectorSearch};
use groundwork_core::{Document, MetadataFilters};
use rusqlite::Connection;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::migrations;
use crate::pragmas::apply_pragmas;
use crate::queries::{document_crud, fts_search, vector_search};
use crate::to_storage_err;

/// Model name recorded on documents when none was configured.
const UNSPECIFIED_MODEL: &str = "unspecified";

/// SQLite-backed document store. One connection, serialized behind an async mutex.
pub struct DocumentStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
    embedding_model: String,
}

impl DocumentStore {
    /// Open (or create) a database file, apply pragmas and migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        let store = Self::init(conn, Some(path.to_path_buf()))?;
        info!(path = %path.display(), "document store opened");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::init(conn, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self, StorageError> {
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
            embedding_model: UNSPECIFIED_MODEL.to_string(),
        })
    }

    /// Model name written into the metadata of embedded documents.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` against the connection.
    pub async fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }

    fn stamp_embedding_metadata(&self, doc: &mut Document) {
        if let Some(embedding) = &doc.embedding {
            doc.metadata
                .insert(META_EMBEDDING_MODEL.to_string(), self.embedding_model.clone());
            doc.metadata.insert(
                META_EMBEDDING_DIMENSION.to_string(),
                embedding.len().to_string(),
            );
        }
    }

    /// Store a chunk. Content already present (same hash) is not duplicated;
    /// the existing document is returned instead.
    pub async fn add_document(
        &self,
        filename: &str,
        content: &str,
        metadata: BTreeMap<String, String>,
        embedding: Option<Vec<f32>>,
    ) -> Result<Document, StorageError> {
        let mut doc = Document::new(filename, content);
        doc.metadata = metadata;
        doc.embedding = embedding;
        self.stamp_embedding_metadata(&mut doc);

        self.with_conn(|conn| {
            if let Some(existing) = document_crud::get_by_hash(conn, &doc.content_hash)? {
                debug!(hash = %doc.content_hash, "duplicate content, keeping existing document");
                return Ok(existing);
            }
            document_crud::insert_document(conn, &doc)?;
            Ok(doc)
        })
        .await
    }

    /// Replace the document stored under `content_hash` with new content.
    pub async fn update_document(
        &self,
        content_hash: &str,
        new_content: &str,
        metadata: BTreeMap<String, String>,
        embedding: Option<Vec<f32>>,
    ) -> Result<Document, StorageError> {
        self.with_conn(|conn| {
            let existing = document_crud::get_by_hash(conn, content_hash)?.ok_or_else(|| {
                StorageError::NotFound {
                    content_hash: content_hash.to_string(),
                }
            })?;

            let mut doc = Document::new(existing.filename, new_content).with_id(existing.id);
            doc.metadata = metadata;
            doc.embedding = embedding;
            self.stamp_embedding_metadata(&mut doc);

            if !document_crud::replace_document(conn, content_hash, &doc)? {
                return Err(StorageError::NotFound {
                    content_hash: content_hash.to_string(),
                });
            }
            Ok(doc)
        })
        .await
    }

    pub async fn get_by_hash(&self, content_hash: &str) -> Result<Option<Document>, StorageError> {
        self.with_conn(|conn| document_crud::get_by_hash(conn, content_hash))
            .await
    }

    pub async fn count(&self) -> Result<usize, StorageError> {
        self.with_conn(document_crud::count).await
    }
}

#[async_trait]
impl IVectorSearch for DocumentStore {
    async fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        threshold: f64,
        filters: &MetadataFilters,
    ) -> Result<Vec<Document>, RetrievalError> {
        let docs = self
            .with_conn(|conn| {
                vector_search::search_vector(conn, query_vector, top_k, threshold, filters)
            })
            .await?;
        Ok(docs)
    }
}

#[async_trait]
impl ILexicalSearch for DocumentStore {
    async fn search(
        &self,
        query_text: &str,
        top_k: usize,
        filters: &MetadataFilters,
    ) -> Result<Vec<Document>, RetrievalError> {
        let docs = self
            .with_conn(|conn| fts_search::search_fts5(conn, query_text, top_k, filters))
            .await?;
        Ok(docs)
    }
}
