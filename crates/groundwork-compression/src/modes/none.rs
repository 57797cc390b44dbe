use groundwork_core::constants::{estimate_tokens, truncate_chars, CHARS_PER_TOKEN};
use groundwork_core::Document;

use crate::render::{join, render_document, ELLIPSIS};

/// Append rendered documents in order while they fit `max_tokens`.
///
/// The first document that does not fit is cut to the remaining budget.
/// Nothing after it is considered.
pub fn concatenate(documents: &[Document], max_tokens: usize) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut used = 0usize;

    for doc in documents {
        let part = render_document(doc);
        let tokens = estimate_tokens(&part);
        if used + tokens <= max_tokens {
            used += tokens;
            parts.push(part);
            continue;
        }

        let remaining = max_tokens - used;
        if remaining > 0 {
            let cut = truncate_chars(&part, remaining * CHARS_PER_TOKEN);
            parts.push(format!("{cut}{ELLIPSIS}"));
        }
        break;
    }

    join(&parts)
}
