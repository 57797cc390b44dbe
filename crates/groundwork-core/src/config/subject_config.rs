use serde::{Deserialize, Serialize};

use super::defaults;

/// Identity of the person the corpus describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectConfig {
    /// Display name used in prompts and canned replies.
    pub name: String,
    /// Extra whole-word tokens that mark a query as being about the subject.
    pub tokens: Vec<String>,
    /// Free-form background appended to the answering system prompt.
    pub description: Option<String>,
}

impl Default for SubjectConfig {
    fn default() -> Self {
        Self {
            name: defaults::DEFAULT_SUBJECT_NAME.to_string(),
            tokens: defaults::DEFAULT_SUBJECT_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            description: None,
        }
    }
}

impl SubjectConfig {
    /// Lowercased subject-reference tokens: configured tokens plus the
    /// words of the name longer than 2 chars (articles excluded).
    pub fn reference_tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self.tokens.iter().map(|t| t.to_lowercase()).collect();
        for word in self.name.split_whitespace() {
            let word = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if word.len() > 2 && word != "the" && !tokens.contains(&word) {
                tokens.push(word);
            }
        }
        tokens
    }
}
