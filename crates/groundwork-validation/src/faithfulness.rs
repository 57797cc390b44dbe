//! Faithfulness judging: prompt, verdict parsing, and the text fallback.

use groundwork_core::constants::{truncate_chars, DOCUMENT_SEPARATOR, NO_CONTEXT_CLAIM};
use groundwork_core::errors::JudgmentError;
use groundwork_core::{Document, GenerationRequest};
use serde::Deserialize;

pub const JUDGE_TEMPERATURE: f32 = 0.1;
pub const JUDGE_MAX_TOKENS: u32 = 500;

/// Missing-claim reason when the verdict had to be read from free text.
pub const UNVERIFIED_CLAIM: &str = "Unable to verify all claims";

const JUDGE_SYSTEM_PROMPT: &str = r#"You are a fact-checker. Decide whether a generated answer is faithful to the context documents: every factual claim must be supported by the context, and nothing may be added that the context does not contain.

Respond with JSON only:
{"is_faithful": true or false, "missing_claims": ["unsupported claim", ...], "confidence": 0.0 to 1.0}"#;

#[derive(Debug, Clone, PartialEq)]
pub struct FaithfulnessVerdict {
    pub is_faithful: bool,
    pub missing_claims: Vec<String>,
}

impl FaithfulnessVerdict {
    pub fn faithful() -> Self {
        Self {
            is_faithful: true,
            missing_claims: Vec::new(),
        }
    }

    /// Verdict for an answer with no evidence at all.
    pub fn no_context() -> Self {
        Self {
            is_faithful: false,
            missing_claims: vec![NO_CONTEXT_CLAIM.to_string()],
        }
    }
}

#[derive(Deserialize)]
struct RawVerdict {
    #[serde(default = "default_faithful")]
    is_faithful: bool,
    #[serde(default)]
    missing_claims: Vec<String>,
}

fn default_faithful() -> bool {
    true
}

/// `From {filename}:\n{content}` for the first `max_docs` documents, each
/// content cut to `doc_chars`.
pub fn judge_context(documents: &[Document], max_docs: usize, doc_chars: usize) -> String {
    documents
        .iter()
        .take(max_docs)
        .map(|d| format!("From {}:\n{}", d.filename, truncate_chars(&d.content, doc_chars)))
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR)
}

pub fn faithfulness_request(answer: &str, context: &str) -> GenerationRequest {
    let prompt = format!(
        "Context documents:\n{context}\n\nGenerated answer:\n{answer}\n\n\
         Is the answer faithful to the context? Respond in JSON:"
    );
    GenerationRequest::single(JUDGE_SYSTEM_PROMPT, prompt)
        .with_temperature(JUDGE_TEMPERATURE)
        .with_max_tokens(JUDGE_MAX_TOKENS)
}

/// Parse the outermost `{...}` of a judge reply.
pub fn parse_verdict(reply: &str) -> Result<FaithfulnessVerdict, JudgmentError> {
    let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) else {
        return Err(JudgmentError::Malformed {
            reason: "no JSON object in reply".to_string(),
        });
    };
    if end < start {
        return Err(JudgmentError::Malformed {
            reason: "unbalanced braces".to_string(),
        });
    }

    let raw: RawVerdict =
        serde_json::from_str(&reply[start..=end]).map_err(|e| JudgmentError::Malformed {
            reason: e.to_string(),
        })?;
    Ok(FaithfulnessVerdict {
        is_faithful: raw.is_faithful,
        missing_claims: if raw.is_faithful {
            Vec::new()
        } else {
            raw.missing_claims
        },
    })
}

/// Verdict from a reply that is not JSON: faithful when it says "true" or
/// "faithful" and never "not faithful".
pub fn verdict_from_text(reply: &str) -> FaithfulnessVerdict {
    let lower = reply.to_lowercase();
    let faithful = (lower.contains("true") || lower.contains("faithful"))
        && !lower.contains("not faithful");
    if faithful {
        FaithfulnessVerdict::faithful()
    } else {
        FaithfulnessVerdict {
            is_faithful: false,
            missing_claims: vec![UNVERIFIED_CLAIM.to_string()],
        }
    }
}
