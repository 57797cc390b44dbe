use serde::{Deserialize, Serialize};

use super::defaults;

/// Answer validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub enable_answer_validation: bool,
    /// Documents shown to the faithfulness judge.
    pub context_docs: usize,
    /// Per-document char cap for the judge.
    pub doc_chars: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enable_answer_validation: defaults::DEFAULT_ENABLE_ANSWER_VALIDATION,
            context_docs: defaults::DEFAULT_VALIDATION_CONTEXT_DOCS,
            doc_chars: defaults::DEFAULT_VALIDATION_DOC_CHARS,
        }
    }
}
