use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use groundwork_core::errors::GenerationError;
use groundwork_core::traits::{IGenerator, TokenStream};
use groundwork_core::GenerationRequest;

/// What a scripted rule answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(GenerationError),
}

/// Generator that answers by rule: the first rule whose needle occurs in the
/// system prompt or any message wins, else the default reply.
///
/// Streams replies word by word and records every request it receives.
pub struct ScriptedGenerator {
    rules: Vec<(String, Reply)>,
    default: Reply,
    delay: Option<Duration>,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            default: Reply::Text(default.into()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Reply::Text(response.into())));
        self
    }

    pub fn fail_on(mut self, needle: impl Into<String>, error: GenerationError) -> Self {
        self.rules.push((needle.into(), Reply::Fail(error)));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of recorded requests mentioning `needle`.
    pub fn calls_matching(&self, needle: &str) -> usize {
        self.calls()
            .iter()
            .filter(|r| Self::mentions(r, needle))
            .count()
    }

    fn mentions(request: &GenerationRequest, needle: &str) -> bool {
        request.system_prompt.contains(needle)
            || request.messages.iter().any(|m| m.content.contains(needle))
    }

    fn reply_for(&self, request: &GenerationRequest) -> Reply {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());
        self.rules
            .iter()
            .find(|(needle, _)| Self::mentions(request, needle))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.default.clone())
    }
}

#[async_trait]
impl IGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.reply_for(request) {
            Reply::Text(text) => Ok(text),
            Reply::Fail(err) => Err(err),
        }
    }

    async fn generate_stream(
        &self,
        request: &GenerationRequest,
    ) -> Result<TokenStream, GenerationError> {
        let text = self.generate(request).await?;
        let chunks: Vec<Result<String, GenerationError>> = text
            .split_inclusive(' ')
            .map(|s| Ok(s.to_string()))
            .collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Generator whose every call fails with the same error.
pub struct FailingGenerator {
    error: GenerationError,
}

impl FailingGenerator {
    pub fn new(error: GenerationError) -> Self {
        Self { error }
    }

    pub fn unavailable() -> Self {
        Self::new(GenerationError::Unavailable {
            reason: "stub generator offline".to_string(),
        })
    }
}

#[async_trait]
impl IGenerator for FailingGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "failing"
    }
}
