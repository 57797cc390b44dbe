//! Incremental decoder for `text/event-stream` chat completion chunks.

use groundwork_core::errors::GenerationError;
use serde::Deserialize;

/// One decoded server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    Data(String),
    Done,
}

/// Line-buffering SSE decoder. Bytes may be split anywhere, including
/// inside a UTF-8 sequence.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every complete `data:` event it finishes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\r', '\n']);

            let Some(payload) = line.strip_prefix("data:") else {
                continue;
            };
            let payload = payload.trim_start();
            if payload == "[DONE]" {
                events.push(SseEvent::Done);
            } else if !payload.is_empty() {
                events.push(SseEvent::Data(payload.to_string()));
            }
        }
        events
    }
}

#[derive(Deserialize)]
struct ChunkEnvelope {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Deserialize, Default)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// The text delta carried by one chunk payload, if any.
pub fn parse_delta(payload: &str) -> Result<Option<String>, GenerationError> {
    let chunk: ChunkEnvelope =
        serde_json::from_str(payload).map_err(|e| GenerationError::Api {
            status: None,
            reason: format!("malformed stream chunk: {e}"),
        })?;
    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_split_across_chunks() {
        let mut d = SseDecoder::new();
        assert!(d.push(b"data: {\"a\"").is_empty());
        let events = d.push(b":1}\n\ndata: [DONE]\n\n");
        assert_eq!(
            events,
            vec![SseEvent::Data("{\"a\":1}".into()), SseEvent::Done]
        );
    }

    #[test]
    fn comments_and_crlf_are_handled() {
        let mut d = SseDecoder::new();
        let events = d.push(b": keep-alive\r\ndata: x\r\n\r\n");
        assert_eq!(events, vec![SseEvent::Data("x".into())]);
    }

    #[test]
    fn multibyte_split_survives() {
        let mut d = SseDecoder::new();
        let bytes = "data: é\n".as_bytes();
        assert!(d.push(&bytes[..7]).is_empty());
        assert_eq!(d.push(&bytes[7..]), vec![SseEvent::Data("é".into())]);
    }

    #[test]
    fn delta_extraction() {
        let p = r#"{"choices":[{"delta":{"content":"Hel"}}]}"#;
        assert_eq!(parse_delta(p).unwrap().as_deref(), Some("Hel"));
        let role_only = r#"{"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_delta(role_only).unwrap(), None);
        assert!(parse_delta("not json").is_err());
    }
}
