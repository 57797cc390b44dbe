//! Context-aware query rewriting through the generation capability.

use std::time::Duration;

use groundwork_core::constants::truncate_chars;
use groundwork_core::errors::JudgmentError;
use groundwork_core::traits::IGenerator;
use groundwork_core::{GenerationRequest, Message};

pub const REWRITE_TEMPERATURE: f32 = 0.1;
pub const REWRITE_MAX_TOKENS: u32 = 100;

const REWRITE_SYSTEM_PROMPT: &str = "You are a query rewriting assistant. Rewrite the user's query \
to be more specific and clear for document retrieval, using context from the conversation \
history if needed.\n\nReturn only the rewritten query, nothing else.";

/// Last `max_messages` turns as `role: content`, each content cut to `max_chars`.
pub fn history_context(history: &[Message], max_messages: usize, max_chars: usize) -> String {
    let start = history.len().saturating_sub(max_messages);
    history[start..]
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str(), truncate_chars(&m.content, max_chars)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn rewrite_request(query: &str, context: &str) -> GenerationRequest {
    let prompt =
        format!("Conversation context:\n{context}\n\nUser query: {query}\n\nRewritten query:");
    GenerationRequest::single(REWRITE_SYSTEM_PROMPT, prompt)
        .with_temperature(REWRITE_TEMPERATURE)
        .with_max_tokens(REWRITE_MAX_TOKENS)
}

/// Resolve `query` against recent history. Blank output is an error.
pub async fn rewrite_query(
    generator: &dyn IGenerator,
    query: &str,
    history: &[Message],
    max_messages: usize,
    max_chars: usize,
    timeout: Duration,
) -> Result<String, JudgmentError> {
    let context = history_context(history, max_messages, max_chars);
    groundwork_llm::judge(generator, &rewrite_request(query, &context), timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_last_messages_truncated() {
        let history = vec![
            Message::user("first"),
            Message::assistant("second"),
            Message::user("third"),
            Message::assistant("x".repeat(300)),
            Message::user("fifth"),
        ];
        let ctx = history_context(&history, 4, 100);
        let lines: Vec<&str> = ctx.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "assistant: second");
        assert_eq!(lines[2].len(), "assistant: ".len() + 100);
        assert_eq!(lines[3], "user: fifth");
    }

    #[test]
    fn request_knobs() {
        let r = rewrite_request("where?", "user: hi");
        assert_eq!(r.temperature, REWRITE_TEMPERATURE);
        assert_eq!(r.max_tokens, REWRITE_MAX_TOKENS);
        assert!(r.last_user_content().unwrap().contains("User query: where?"));
    }
}
