use groundwork_core::GenerationRequest;

pub const REGENERATION_TEMPERATURE: f32 = 0.3;

const REGENERATION_SYSTEM_PROMPT: &str = "You are rewriting an answer so that it is fully \
grounded in the context documents.\n\nRules:\n- State only facts that appear in the context \
documents.\n- Do not invent names, dates, numbers or details.\n- When the context does not \
contain something the question asks for, say so plainly.";

pub fn regeneration_request(
    query: &str,
    answer: &str,
    context: &str,
    missing_claims: &[String],
    max_tokens: u32,
) -> GenerationRequest {
    let missing = if missing_claims.is_empty() {
        "None specified".to_string()
    } else {
        missing_claims.join(", ")
    };
    let prompt = format!(
        "Context documents:\n{context}\n\nOriginal query: {query}\n\n\
         Previous answer (not fully supported by the context):\n{answer}\n\n\
         Unsupported claims: {missing}\n\n\
         Write a new answer using only the context documents:"
    );
    GenerationRequest::single(REGENERATION_SYSTEM_PROMPT, prompt)
        .with_temperature(REGENERATION_TEMPERATURE)
        .with_max_tokens(max_tokens)
}
