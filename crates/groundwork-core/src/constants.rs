/// Groundwork version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Characters per token used by the cheap token estimate.
pub const CHARS_PER_TOKEN: usize = 4;

/// Separator placed between rendered documents in a context blob.
pub const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Metadata key under which the embedding model name is stored.
pub const META_EMBEDDING_MODEL: &str = "embedding_model";

/// Metadata key under which the embedding dimension is stored.
pub const META_EMBEDDING_DIMENSION: &str = "embedding_dimension";

/// Missing-claim reason reported when validation runs without evidence.
pub const NO_CONTEXT_CLAIM: &str = "No context documents available";

/// Estimate the token count of a text as `chars / 4`.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn estimate_is_quarter_of_chars() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens(&"x".repeat(401)), 100);
    }
}
