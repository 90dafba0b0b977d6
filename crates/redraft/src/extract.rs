//! Extraction of diagram code and edit scripts from generator output.
//!
//! Text produced by a model often wraps the payload in a markdown code fence
//! or in a sentence of prose. These functions return the payload itself.
//! Input that carries no wrapper is returned unchanged.

use std::sync::LazyLock;

use regex::Regex;

static DIAGRAM_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:mermaid)?\s*(.*?)```").expect("Diagram fence pattern is valid")
});

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*\})\s*```").expect("JSON fence pattern is valid")
});

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON object pattern is valid"));

/// Returns the diagram inside the first code fence of `text`.
///
/// The fence may be tagged `mermaid` or untagged. Without a fence, `text` is
/// returned as is.
///
/// # Examples
///
/// ```
/// # use redraft::extract_diagram_code;
/// let raw = "Here you go:\n```mermaid\nclassDiagram\nclass User\n```\n";
/// assert_eq!(extract_diagram_code(raw), "classDiagram\nclass User");
///
/// assert_eq!(extract_diagram_code("classDiagram\n"), "classDiagram\n");
/// ```
pub fn extract_diagram_code(text: &str) -> &str {
    DIAGRAM_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |body| body.as_str().trim())
}

/// Returns the JSON object in `text`.
///
/// A fenced object (tagged `json` or untagged) wins. Otherwise the span from
/// the first `{` to the last `}` is taken. When neither is found, `text` is
/// returned as is and decoding reports the problem.
///
/// # Examples
///
/// ```
/// # use redraft::extract_edit_json;
/// let raw = "Sure! ```json\n{\"edits\": []}\n``` Let me know.";
/// assert_eq!(extract_edit_json(raw), "{\"edits\": []}");
///
/// assert_eq!(extract_edit_json("The edits are {\"edits\": []}."), "{\"edits\": []}");
/// ```
pub fn extract_edit_json(text: &str) -> &str {
    let found = if text.contains("```") {
        JSON_FENCE.captures(text).and_then(|caps| caps.get(1))
    } else {
        JSON_OBJECT.find(text)
    };
    found.map_or(text, |object| object.as_str())
}
