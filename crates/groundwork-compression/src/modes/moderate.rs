use std::collections::HashSet;

use groundwork_core::constants::{truncate_chars, CHARS_PER_TOKEN};
use groundwork_core::Document;

use crate::render::{join, render, ELLIPSIS};

/// Documents whose first `prefix_chars` characters hash to an already-seen
/// value are dropped. Order is preserved.
pub fn dedup_by_prefix(documents: &[Document], prefix_chars: usize) -> Vec<&Document> {
    let mut seen: HashSet<blake3::Hash> = HashSet::new();
    documents
        .iter()
        .filter(|d| seen.insert(blake3::hash(truncate_chars(&d.content, prefix_chars).as_bytes())))
        .collect()
}

/// Dedup, then give each unique document an equal share of `max_tokens`.
pub fn dedup_and_truncate(documents: &[Document], max_tokens: usize, prefix_chars: usize) -> String {
    let unique = dedup_by_prefix(documents, prefix_chars);
    if unique.is_empty() {
        return String::new();
    }

    let max_chars = (max_tokens / unique.len()) * CHARS_PER_TOKEN;
    let parts: Vec<String> = unique
        .iter()
        .map(|d| {
            if d.content.chars().count() > max_chars {
                let cut = truncate_chars(&d.content, max_chars.saturating_sub(ELLIPSIS.len()));
                render(&d.filename, &format!("{cut}{ELLIPSIS}"))
            } else {
                render(&d.filename, &d.content)
            }
        })
        .collect();

    join(&parts)
}
