//! Brute-force cosine similarity over stored embedding blobs.

use groundwork_core::errors::StorageError;
use groundwork_core::{Document, MetadataFilters};
use rusqlite::Connection;

use super::document_crud::{RawDocumentRow, DOCUMENT_COLUMNS};
use crate::to_storage_err;

/// Documents whose cosine similarity to `query` is strictly above
/// `threshold` and that contain every filter pair, best first.
///
/// Rows with a different dimension than the query are skipped.
pub fn search_vector(
    conn: &Connection,
    query: &[f32],
    top_k: usize,
    threshold: f64,
    filters: &MetadataFilters,
) -> Result<Vec<Document>, StorageError> {
    let query_norm_sq: f64 = query.iter().map(|x| (*x as f64) * (*x as f64)).sum();
    if query_norm_sq == 0.0 || top_k == 0 {
        return Ok(Vec::new());
    }

    let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE embedding IS NOT NULL");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| RawDocumentRow::read(row, 0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored: Vec<Document> = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        if raw.dimensions() != Some(query.len()) {
            continue;
        }
        let sim = match raw.embedding_blob() {
            Some(blob) => cosine_similarity(query, &bytes_to_f32_vec(blob, query.len())),
            None => continue,
        };
        if sim <= threshold {
            continue;
        }
        let mut doc = raw.into_document()?;
        if !doc.matches_filters(filters) {
            continue;
        }
        doc.embedding = None;
        doc.similarity = Some(sim);
        scored.push(doc);
    }

    scored.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(top_k);
    Ok(scored)
}

/// Little-endian f32 encoding.
pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

pub fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> Vec<f32> {
    let mut result = Vec::with_capacity(expected_dims);
    for chunk in bytes.chunks_exact(4) {
        result.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    result
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_encoding_is_little_endian() {
        let bytes = f32_vec_to_bytes(&[1.0, -2.5]);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[..4], &1.0f32.to_le_bytes());
        assert_eq!(bytes_to_f32_vec(&bytes, 2), vec![1.0, -2.5]);
    }

    #[test]
    fn cosine_edge_cases() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 1.0]), 0.0);
    }
}
