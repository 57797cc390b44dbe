//! ChatCompletionsGenerator: `IGenerator` over `/v1/chat/completions`.

use std::collections::VecDeque;

use async_trait::async_trait;
use futures::StreamExt;
use groundwork_core::config::GenerationConfig;
use groundwork_core::errors::GenerationError;
use groundwork_core::traits::{IGenerator, TokenStream};
use groundwork_core::GenerationRequest;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors;
use crate::sse::{parse_delta, SseDecoder, SseEvent};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat generator. Single attempt per call.
pub struct ChatCompletionsGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout_ms: u64,
}

impl ChatCompletionsGenerator {
    pub fn new(config: &GenerationConfig, api_key: String) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GenerationError::Internal {
                reason: format!("client build failed: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: config
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: config.model.clone(),
            api_key,
            timeout_ms: config.timeout_ms,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn body<'a>(&'a self, request: &'a GenerationRequest, stream: bool) -> ChatBody<'a> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if !request.system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: &request.system_prompt,
            });
        }
        messages.extend(request.messages.iter().map(|m| ChatMessage {
            role: m.role.as_str(),
            content: &m.content,
        }));

        ChatBody {
            model: &self.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream,
        }
    }

    async fn send(
        &self,
        request: &GenerationRequest,
        stream: bool,
    ) -> Result<reqwest::Response, GenerationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.body(request, stream))
            .send()
            .await
            .map_err(|e| errors::from_transport(&e, self.timeout_ms))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(errors::from_status(status.as_u16(), &body))
    }
}

#[async_trait]
impl IGenerator for ChatCompletionsGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let response = self.send(request, false).await?;
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| errors::from_transport(&e, self.timeout_ms))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GenerationError::Api {
                status: None,
                reason: "response carried no message content".to_string(),
            })?;
        debug!(model = %self.model, chars = text.len(), "completion received");
        Ok(text)
    }

    async fn generate_stream(
        &self,
        request: &GenerationRequest,
    ) -> Result<TokenStream, GenerationError> {
        let response = self.send(request, true).await?;
        let timeout_ms = self.timeout_ms;

        let state = (
            Box::pin(response.bytes_stream()),
            SseDecoder::new(),
            VecDeque::<Result<String, GenerationError>>::new(),
            false,
        );

        let tokens = futures::stream::unfold(
            state,
            move |(mut bytes, mut decoder, mut pending, mut done)| async move {
                loop {
                    if let Some(item) = pending.pop_front() {
                        return Some((item, (bytes, decoder, pending, done)));
                    }
                    if done {
                        return None;
                    }
                    match bytes.next().await {
                        Some(Ok(chunk)) => {
                            for event in decoder.push(&chunk) {
                                match event {
                                    SseEvent::Done => {
                                        done = true;
                                        break;
                                    }
                                    SseEvent::Data(payload) => match parse_delta(&payload) {
                                        Ok(Some(text)) => pending.push_back(Ok(text)),
                                        Ok(None) => {}
                                        Err(e) => {
                                            pending.push_back(Err(e));
                                            done = true;
                                            break;
                                        }
                                    },
                                }
                            }
                        }
                        Some(Err(e)) => {
                            pending.push_back(Err(errors::from_transport(&e, timeout_ms)));
                            done = true;
                        }
                        None => done = true,
                    }
                }
            },
        );

        Ok(Box::pin(tokens))
    }

    fn name(&self) -> &str {
        &self.model
    }
}
