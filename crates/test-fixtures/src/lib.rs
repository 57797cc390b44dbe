//! Test fixtures for Groundwork: the profile corpus, a JSON fixture loader,
//! and scripted stand-ins for the four capabilities the pipeline consumes.

pub mod corpus;
pub mod stubs;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use corpus::{embedded_corpus, load_profile_corpus, CorpusEntry, PROFILE_SUBJECT};
pub use stubs::{
    FailingGenerator, Reply, ScriptedGenerator, StaticLexicalSearch, StaticVectorSearch,
    StubEmbedder,
};

/// Root directory of the fixture data files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}
