//! # groundwork-llm
//!
//! Text-generation capability over an OpenAI-compatible
//! `/v1/chat/completions` endpoint, plain or streamed as server-sent events,
//! plus the bounded single-shot [`judge`] call used by every advisory stage.

pub mod chat;
pub mod errors;
pub mod judgment;
pub mod sse;

pub use chat::ChatCompletionsGenerator;
pub use judgment::judge;
