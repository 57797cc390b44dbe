use serde::{Deserialize, Serialize};

use super::Message;

/// A single call to the text-generation capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(system_prompt: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages,
            temperature: 0.7,
            max_tokens: 300,
        }
    }

    /// A system prompt plus one user message.
    pub fn single(system_prompt: impl Into<String>, user: impl Into<String>) -> Self {
        Self::new(system_prompt, vec![Message::user(user)])
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Text of the last user message, if any.
    pub fn last_user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == super::Role::User)
            .map(|m| m.content.as_str())
    }
}
