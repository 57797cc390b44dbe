//! FTS5 full-text search ranked by BM25.

use groundwork_core::errors::StorageError;
use groundwork_core::{Document, MetadataFilters};
use rusqlite::{params, Connection};

use super::document_crud::{RawDocumentRow, DOCUMENT_COLUMNS};
use crate::to_storage_err;

/// English stop words (the Snowball list) plus the request phrasing users
/// wrap questions in. Every remaining term must match, so these are dropped.
const IGNORED_TERMS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "s", "same", "she",
    "should", "so", "some", "such", "t", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
    // Request phrasing.
    "tell", "describe", "explain", "show", "give", "list", "know", "please", "share",
];

/// Quote every meaningful term and AND them together. None when no term survives.
pub fn build_match_expression(query: &str) -> Option<String> {
    let terms: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .filter(|t| !IGNORED_TERMS.contains(&t.as_str()))
        .map(|t| format!("\"{t}\""))
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" AND "))
    }
}

/// Documents matching every query term, best BM25 first.
///
/// `similarity` is the negated BM25 score, so higher is better. With
/// filters present the query is unbounded and the limit applies after filtering.
pub fn search_fts5(
    conn: &Connection,
    query: &str,
    top_k: usize,
    filters: &MetadataFilters,
) -> Result<Vec<Document>, StorageError> {
    let Some(expr) = build_match_expression(query) else {
        return Ok(Vec::new());
    };
    if top_k == 0 {
        return Ok(Vec::new());
    }
    let limit: i64 = if filters.is_empty() { top_k as i64 } else { -1 };

    let columns = DOCUMENT_COLUMNS
        .split(", ")
        .map(|c| format!("d.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT bm25(documents_fts) AS score, {columns}
         FROM documents_fts
         JOIN documents d ON d.rowid = documents_fts.rowid
         WHERE documents_fts MATCH ?1
         ORDER BY score
         LIMIT ?2"
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![expr, limit], |row| {
            let score: f64 = row.get(0)?;
            Ok((score, RawDocumentRow::read(row, 1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (score, raw) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let mut doc = raw.into_document()?;
        if !doc.matches_filters(filters) {
            continue;
        }
        doc.embedding = None;
        doc.similarity = Some(-score);
        results.push(doc);
        if results.len() == top_k {
            break;
        }
    }
    Ok(results)
}
