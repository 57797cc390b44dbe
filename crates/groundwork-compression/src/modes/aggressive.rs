use groundwork_core::constants::truncate_chars;
use groundwork_core::GenerationRequest;

pub const AGGRESSIVE_TEMPERATURE: f32 = 0.1;

const COMPRESSION_SYSTEM_PROMPT: &str = "You are a context compression assistant. Shorten the \
documents below without losing information: keep every name, date, number, technology and \
concrete fact, drop repetition and filler, and keep each fact attributed to its source file.";

/// Request asking the generator to condense `context` into `max_tokens`.
/// The context is cut to `input_chars` first.
pub fn compression_request(context: &str, max_tokens: usize, input_chars: usize) -> GenerationRequest {
    let prompt = format!(
        "Compress the following context to roughly {max_tokens} tokens, preserving all key \
         information:\n\n{}",
        truncate_chars(context, input_chars)
    );
    GenerationRequest::single(COMPRESSION_SYSTEM_PROMPT, prompt)
        .with_temperature(AGGRESSIVE_TEMPERATURE)
        .with_max_tokens(u32::try_from(max_tokens).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_capped() {
        let context = "x".repeat(10_000);
        let r = compression_request(&context, 1500, 8000);
        let prompt = r.last_user_content().unwrap_or_default();
        assert!(prompt.ends_with(&"x".repeat(8000)));
        assert!(!prompt.contains(&"x".repeat(8001)));
        assert_eq!(r.max_tokens, 1500);
        assert_eq!(r.temperature, AGGRESSIVE_TEMPERATURE);
    }
}
