use crate::llm_client::prompts::{HTML_ONLY_INSTRUCTION, JSON_ONLY_SYSTEM};

/// System prompt for suggestion calls. The reply must be the JSON shape
/// `SuggestionReply` deserializes.
pub fn suggestion_system() -> String {
    format!(
        "You are an expert resume writer working inside a rich-text resume editor. \
        {JSON_ONLY_SYSTEM} \
        Return a JSON object with exactly two fields: \
        \"response\" (one or two sentences for the user describing what you changed) and \
        \"output\" (the full replacement HTML for the document, or an empty string if \
        the request cannot be fulfilled)."
    )
}

/// Combines the user's request with the current document.
/// Replace: {user_prompt}, {html_instruction}, {document}
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"{user_prompt} {html_instruction}

CURRENT DOCUMENT (HTML):
{document}"#;

pub fn compose_prompt(user_prompt: &str, document: &str) -> String {
    SUGGESTION_PROMPT_TEMPLATE
        .replace("{user_prompt}", user_prompt.trim())
        .replace("{html_instruction}", HTML_ONLY_INSTRUCTION)
        .replace("{document}", document)
}
