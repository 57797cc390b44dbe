//! The profile corpus used by integration tests.

use std::collections::BTreeMap;

use groundwork_core::Document;
use serde::Deserialize;

use crate::stubs::StubEmbedder;

/// Name of the person `data/profile.json` describes.
pub const PROFILE_SUBJECT: &str = "Avery Quinn";

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusEntry {
    pub filename: String,
    pub content: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl CorpusEntry {
    pub fn into_document(self) -> Document {
        let mut doc = Document::new(self.filename, self.content);
        doc.metadata = self.metadata;
        doc
    }
}

/// All profile chunks as documents, without embeddings.
pub fn load_profile_corpus() -> Vec<Document> {
    let entries: Vec<CorpusEntry> = crate::load_fixture("profile.json");
    entries.into_iter().map(CorpusEntry::into_document).collect()
}

/// All profile chunks with `StubEmbedder` vectors attached.
pub fn embedded_corpus() -> Vec<Document> {
    let embedder = StubEmbedder::new();
    load_profile_corpus()
        .into_iter()
        .map(|doc| {
            let vector = embedder.vectorize(&doc.content);
            doc.with_embedding(vector)
        })
        .collect()
}
