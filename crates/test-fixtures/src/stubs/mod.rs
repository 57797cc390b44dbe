//! Deterministic stand-ins for the embedding, search and generation capabilities.

mod embedder;
mod generator;
mod search;

pub use embedder::StubEmbedder;
pub use generator::{FailingGenerator, Reply, ScriptedGenerator};
pub use search::{StaticLexicalSearch, StaticVectorSearch};

/// Cosine similarity; 0.0 for mismatched lengths or zero vectors.
pub(crate) fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        dot += (*x as f64) * (*y as f64);
        na += (*x as f64) * (*x as f64);
        nb += (*y as f64) * (*y as f64);
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}
