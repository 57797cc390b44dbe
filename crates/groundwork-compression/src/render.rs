//! Document → context text.

use groundwork_core::constants::DOCUMENT_SEPARATOR;
use groundwork_core::Document;

pub const ELLIPSIS: &str = "...";

/// `From {filename}:\n{content}`
pub fn render(filename: &str, content: &str) -> String {
    format!("From {filename}:\n{content}")
}

pub fn render_document(doc: &Document) -> String {
    render(&doc.filename, &doc.content)
}

pub fn join(parts: &[String]) -> String {
    parts.join(DOCUMENT_SEPARATOR)
}

/// Every document rendered and joined, uncompressed.
pub fn render_all(documents: &[Document]) -> String {
    let parts: Vec<String> = documents.iter().map(render_document).collect();
    join(&parts)
}
