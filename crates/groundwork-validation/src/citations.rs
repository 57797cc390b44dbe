use std::collections::{BTreeMap, BTreeSet};

use groundwork_core::Document;

/// Sentence index recorded for every citation.
const FIRST_SENTENCE: usize = 0;

/// Filenames that appear verbatim in `answer`, each mapped to `[0]`.
pub fn extract_citations(answer: &str, documents: &[Document]) -> BTreeMap<String, Vec<usize>> {
    documents
        .iter()
        .filter(|d| !d.filename.is_empty() && answer.contains(d.filename.as_str()))
        .map(|d| (d.filename.clone(), vec![FIRST_SENTENCE]))
        .collect()
}

/// Every distinct context filename.
pub fn collect_sources(documents: &[Document]) -> BTreeSet<String> {
    documents.iter().map(|d| d.filename.clone()).collect()
}

/// Append `\n\nSources: a, b` in filename order. No citations, no change.
pub fn add_inline_citations(answer: &str, citations: &BTreeMap<String, Vec<usize>>) -> String {
    if citations.is_empty() {
        return answer.to_string();
    }
    let names: Vec<&str> = citations.keys().map(String::as_str).collect();
    format!("{answer}\n\nSources: {}", names.join(", "))
}
