//! System prompts, canned replies and the user-message envelope.

use groundwork_core::config::SubjectConfig;
use groundwork_core::QueryType;

pub const CONTEXT_HEADER: &str = "--- Relevant Information ---";
pub const NO_INFORMATION_HEADER: &str = "--- Important: No Relevant Information Retrieved ---";
pub const QUESTION_HEADER: &str = "--- User Question ---";

pub fn greeting_reply(name: &str) -> String {
    format!(
        "Hi! I'm {name}'s AI assistant. I can help you learn about {name}'s background, \
         projects, and skills. What would you like to know?"
    )
}

pub fn out_of_scope_reply(name: &str) -> String {
    format!(
        "I'm specifically designed to answer questions about {name} and their professional \
         skills and education. For out-of-scope questions like this, I'd recommend a \
         general-purpose AI assistant. Is there anything you'd like to know about {name}?"
    )
}

fn greeting_prompt(name: &str) -> String {
    format!(
        "You are {name}'s AI assistant. The user has sent a greeting, small talk or a \
         conversational opener. Do not look anything up. Reply warmly, introduce yourself \
         and say what you can help with, using this reply:\n\"{}\"\n\
         Keep it friendly, professional and brief (1-2 sentences).",
        greeting_reply(name)
    )
}

fn out_of_scope_prompt(name: &str) -> String {
    format!(
        "You are {name}'s AI assistant. The user has asked something clearly outside your \
         scope, such as the weather, general knowledge or current events. Redirect them \
         politely to your actual purpose using this exact reply:\n\"{}\"\n\
         Keep it brief, friendly and professional (1-2 sentences).",
        out_of_scope_reply(name)
    )
}

fn answering_prompt(subject: &SubjectConfig) -> String {
    let name = &subject.name;
    let mut prompt = format!(
        "You are {name}'s AI assistant. Answer questions about {name}'s professional \
         background, skills, experience, education and projects using only the provided \
         information.\n\n\
         Rules:\n\
         - Speak about {name} in the third person. You are not {name}.\n\
         - Never invent facts. If the information is not provided, say so.\n\
         - Keep answers short: 2-3 sentences for simple questions, 3-4 for complex ones.\n\
         - Prefer flowing sentences over bullet points.\n\
         - Lead with what {name} built or achieved and the technologies used.\n\
         - Only answer questions about {name}; politely decline anything else."
    );
    if let Some(description) = subject.description.as_deref().filter(|d| !d.trim().is_empty()) {
        prompt.push_str("\n\nAbout ");
        prompt.push_str(name);
        prompt.push_str(":\n");
        prompt.push_str(description.trim());
    }
    prompt
}

pub fn system_prompt(query_type: QueryType, subject: &SubjectConfig) -> String {
    match query_type {
        QueryType::Greeting => greeting_prompt(&subject.name),
        QueryType::OutOfScope => out_of_scope_prompt(&subject.name),
        _ => answering_prompt(subject),
    }
}

/// Compressed evidence under the context header.
pub fn context_block(compressed: &str) -> String {
    format!("{CONTEXT_HEADER}\n{compressed}")
}

/// Warning sent in place of context when a retrieving query found nothing.
pub fn no_information_block(name: &str) -> String {
    format!(
        "{NO_INFORMATION_HEADER}\n\
         WARNING: No relevant documents were retrieved for this query. You MUST NOT \
         fabricate any information. Say honestly that you do not have that information \
         about {name}, and offer to help with questions about {name}'s background, \
         skills, projects or education instead."
    )
}

/// Final user turn. Meta types get the bare query.
pub fn user_message(query_type: QueryType, query: &str, context: Option<&str>) -> String {
    match context {
        Some(context) if !query_type.is_meta() && !context.is_empty() => {
            format!("{context}\n\n{QUESTION_HEADER}\n{query}")
        }
        _ => query.to_string(),
    }
}
