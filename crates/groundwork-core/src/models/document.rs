use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata containment filter: every pair must be present on a document.
pub type MetadataFilters = BTreeMap<String, String>;

/// A retrievable chunk of the profile corpus.
///
/// Immutable once stored. `similarity` is a per-query annotation written by
/// whichever stage ranked the document last and is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub content: String,
    /// blake3 hex digest of `content`; unique per stored chunk.
    pub content_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub similarity: Option<f64>,
}

impl Document {
    /// Build a document with a fresh id and computed content hash.
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            filename: filename.into(),
            content_hash: Self::compute_content_hash(&content),
            content,
            embedding: None,
            metadata: BTreeMap::new(),
            similarity: None,
        }
    }

    /// blake3 hex digest of the content.
    pub fn compute_content_hash(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }

    /// Identity used for fusion and dedup: content hash, falling back to id.
    pub fn identity_key(&self) -> &str {
        if self.content_hash.is_empty() {
            &self.id
        } else {
            &self.content_hash
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_similarity(mut self, similarity: f64) -> Self {
        self.similarity = Some(similarity);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Whether every filter pair is contained in this document's metadata.
    pub fn matches_filters(&self, filters: &MetadataFilters) -> bool {
        filters
            .iter()
            .all(|(k, v)| self.metadata.get(k).is_some_and(|have| have == v))
    }
}
