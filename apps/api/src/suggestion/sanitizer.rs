//! Content Sanitizer: normalizes raw model output into markup that can be
//! dropped into an existing editing surface.
//!
//! Steps, applied in order until the output stops changing:
//! 1. strip carriage returns
//! 2. delete every newline together with the whitespace that follows it
//! 3. drop empty paragraphs (`<p></p>`, `<p> </p>`)
//! 4. drop document wrappers (doctype, `<html>`, `<head>...</head>`, `<body>`)
//! 5. collapse runs of two or more `<br>` into one
//! 6. trim
//!
//! Every step only removes text, so iterating to a fixed point terminates and
//! makes `sanitize` idempotent even for nested cases like `<p><p></p></p>`.

use std::sync::OnceLock;

use regex::Regex;

fn newline_indent() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*").unwrap())
}

fn empty_paragraph() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<p>\s*</p>").unwrap())
}

fn document_wrapper() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<!doctype[^>]*>|<head\b[^>]*>.*?</head>|</?(?:html|body)\b[^>]*>").unwrap()
    })
}

fn repeated_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>(?:\s*<br\s*/?>)+").unwrap())
}

/// Normalizes raw markup. Empty output means "no usable content"; callers must
/// not touch the document in that case.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

/// `sanitize` for values that may be absent, e.g. a reply without `output`.
pub fn sanitize_opt(raw: Option<&str>) -> String {
    raw.map(sanitize).unwrap_or_default()
}

fn sanitize_pass(input: &str) -> String {
    let text = input.replace('\r', "");
    let text = newline_indent().replace_all(&text, "");
    let text = empty_paragraph().replace_all(&text, "");
    let text = document_wrapper().replace_all(&text, "");
    let text = repeated_breaks().replace_all(&text, "<br>");
    text.trim().to_string()
}
