use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

type PathMatcher = fn(&Value) -> Option<&str>;

// outputs[0].outputs[0].message.message
fn nested_message(v: &Value) -> Option<&str> {
    v.get("outputs")?
        .get(0)?
        .get("outputs")?
        .get(0)?
        .get("message")?
        .get("message")?
        .as_str()
}

// outputs[0].messages[0].message
fn first_message(v: &Value) -> Option<&str> {
    v.get("outputs")?
        .get(0)?
        .get("messages")?
        .get(0)?
        .get("message")?
        .as_str()
}

// outputs[0].outputs[0].results.message.text
fn results_text(v: &Value) -> Option<&str> {
    v.get("outputs")?
        .get(0)?
        .get("outputs")?
        .get(0)?
        .get("results")?
        .get("message")?
        .get("text")?
        .as_str()
}

// outputs[0].outputs[0].outputs.message.message
fn doubly_nested_message(v: &Value) -> Option<&str> {
    v.get("outputs")?
        .get(0)?
        .get("outputs")?
        .get(0)?
        .get("outputs")?
        .get("message")?
        .get("message")?
        .as_str()
}

// outputs[0].artifacts.message
fn artifacts_message(v: &Value) -> Option<&str> {
    v.get("outputs")?
        .get(0)?
        .get("artifacts")?
        .get("message")?
        .as_str()
}

// outputs[0].outputs[0].artifacts.message
fn nested_artifacts_message(v: &Value) -> Option<&str> {
    v.get("outputs")?
        .get(0)?
        .get("outputs")?
        .get(0)?
        .get("artifacts")?
        .get("message")?
        .as_str()
}

/// The provider's response shape is not contractually stable; these are
/// the known shapes, tried in priority order. The ordering is part of
/// the contract: the first match wins.
const PATTERNS: &[(&str, PathMatcher)] = &[
    ("outputs[0].outputs[0].message.message", nested_message),
    ("outputs[0].messages[0].message", first_message),
    ("outputs[0].outputs[0].results.message.text", results_text),
    ("outputs[0].outputs[0].outputs.message.message", doubly_nested_message),
    ("outputs[0].artifacts.message", artifacts_message),
    ("outputs[0].outputs[0].artifacts.message", nested_artifacts_message),
];

/// Locates the human-readable message in an analysis response. Total
/// over arbitrary JSON: a miss is `None`, never an error.
pub fn extract_message(response: &Value) -> Option<String> {
    for (path, matcher) in PATTERNS {
        if let Some(message) = matcher(response) {
            tracing::debug!(path = %path, "extracted analysis message");
            return Some(message.to_string());
        }
    }

    tracing::debug!("no message found in any known response shape");
    None
}

fn bold_markers() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold marker regex"))
}

/// Strips markdown bold markers, swaps hyphen bullets for a bullet
/// glyph, and trims. Idempotent.
pub fn format_message(message: &str) -> String {
    let stripped = bold_markers().replace_all(message, "$1");
    stripped.replace("- ", "• ").trim().to_string()
}
