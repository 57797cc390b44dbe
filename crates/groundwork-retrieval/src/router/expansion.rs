//! Connective-based query expansion.

use std::sync::LazyLock;

use regex::Regex;

use super::classifier::{matches, word_alternation};

/// Connectives counted for expansion; single words match whole-word.
pub const CONNECTIVES: &[&str] = &["and", "or", "also", "what about", "how about"];

/// Minimum distinct connectives before a query is expanded.
pub const EXPANSION_MIN_CONNECTIVES: usize = 2;

static SPLIT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:and|or|also|what about|how about)\s+").ok());

static CONNECTIVE_RES: LazyLock<Vec<Option<Regex>>> =
    LazyLock::new(|| CONNECTIVES.iter().map(|c| word_alternation(&[c])).collect());

/// Whether `q` (lowercased) contains at least two distinct connectives.
pub fn requires_expansion(q: &str) -> bool {
    let present = CONNECTIVE_RES.iter().filter(|re| matches(re, q)).count();
    present >= EXPANSION_MIN_CONNECTIVES
}

/// The original query followed by its non-empty connective-separated parts,
/// without repeats, at most `max_queries` in total.
pub fn expand(query: &str, max_queries: usize) -> Vec<String> {
    let mut expanded = vec![query.to_string()];
    let Some(split_re) = SPLIT_RE.as_ref() else {
        return expanded;
    };
    for part in split_re.split(query) {
        let part = part.trim();
        if !part.is_empty() && !expanded.iter().any(|e| e == part) {
            expanded.push(part.to_string());
        }
    }
    expanded.truncate(max_queries.max(1));
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_connectives_trigger_expansion() {
        assert!(requires_expansion("python and docker, also react"));
        assert!(!requires_expansion("python and docker"));
        assert!(!requires_expansion("order history for work"));
    }

    #[test]
    fn expansion_keeps_original_first_and_caps() {
        let out = expand("Python and Docker or React", 3);
        assert_eq!(out, vec!["Python and Docker or React", "Python", "Docker"]);
    }

    #[test]
    fn no_connective_yields_only_original() {
        assert_eq!(expand("education", 3), vec!["education"]);
    }
}
