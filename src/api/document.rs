//
//  jira-cli
//  api/document.rs
//

//! # Structured Document Text Extraction
//!
//! Depending on deployment and API version, an issue description arrives
//! either as a plain string or as a structured rich-text document (a tree
//! of typed nodes). This module flattens the structured form into plain
//! text for terminal display. Formatting marks (bold, links, colors) are
//! dropped; only text content and block boundaries survive.

use serde_json::Value;

/// Node types that terminate a block of text.
///
/// A newline is appended after each of these, even when the node produced
/// no text, so empty paragraphs still separate their neighbors.
const BLOCK_NODE_TYPES: [&str; 5] = [
    "paragraph",
    "heading",
    "blockquote",
    "bulletList",
    "orderedList",
];

/// Recursively extracts plain text from a structured document value.
///
/// - Strings yield themselves.
/// - Arrays yield the concatenation of their elements.
/// - Objects yield their `text` leaf (if any), then their `content`
///   children, then a trailing newline when the node is a block type.
/// - Anything else yields nothing.
pub fn extract_plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(extract_plain_text).collect(),
        Value::Object(map) => {
            let mut out = String::new();

            if let Some(text) = map.get("text").and_then(|t| t.as_str()) {
                out.push_str(text);
            }
            if let Some(content) = map.get("content") {
                out.push_str(&extract_plain_text(content));
            }

            if let Some(node_type) = map.get("type").and_then(|t| t.as_str()) {
                if BLOCK_NODE_TYPES.contains(&node_type) {
                    out.push('\n');
                }
            }

            out
        }
        _ => String::new(),
    }
}

/// Renders an issue description field for display.
///
/// Handles both wire shapes: a plain string passes through unchanged, a
/// structured document is flattened. A missing description yields an
/// empty string.
pub fn description_text(description: Option<&Value>) -> String {
    match description {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => extract_plain_text(other),
    }
}
