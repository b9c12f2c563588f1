// Cross-cutting prompt fragments.
// Feature-specific prompts live next to the feature (see suggestion/prompts.rs).

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every user prompt whose answer is inserted into the editor.
pub const HTML_ONLY_INSTRUCTION: &str = "Return ONLY clean HTML that can be inserted into a \
    rich-text editor. Do NOT include any extra commentary like \"Here is your answer\" or \
    explanations. Do not add placeholders or unnecessary line breaks. Use only basic HTML \
    tags (p, h1-h3, strong, em, u, ul, ol, li, hr, br). Keep it minimal and compact.";
