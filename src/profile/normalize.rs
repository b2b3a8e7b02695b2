//! Text Normalizer: profile attributes + ask → canonical embedding text.

use serde_json::Value;
use tracing::debug;

use super::Attributes;
use crate::constants::USER_PROMPT_KEY;

const PART_SEPARATOR: &str = ", ";
const LIST_SEPARATOR: &str = ", ";

/// Builds the embedding text for `attributes` under `schema`, then appends the prompt.
///
/// Keys are emitted in schema order as `"key: value"`. Absent, null, blank and
/// empty-list attributes are skipped; list values are joined with `", "`. The
/// prompt is appended as `"user_prompt: <prompt>"` only when it is non-blank.
pub fn build_embedding_text(attributes: &Attributes, schema: &[&str], prompt: &str) -> String {
    let mut parts: Vec<String> = schema
        .iter()
        .filter_map(|key| {
            let value = format_attribute(attributes.get(*key)?)?;
            Some(format!("{key}: {value}"))
        })
        .collect();

    let prompt = prompt.trim();
    if !prompt.is_empty() {
        parts.push(format!("{USER_PROMPT_KEY}: {prompt}"));
    }

    let text = parts.join(PART_SEPARATOR);
    debug!(
        parts = parts.len(),
        text_len = text.len(),
        "Built embedding text"
    );
    text
}

/// Renders one attribute value, or `None` if it carries nothing.
///
/// Nulls inside lists are skipped, so a list of nulls renders as empty.
pub fn format_attribute(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().filter_map(format_attribute).collect();
            (!rendered.is_empty()).then(|| rendered.join(LIST_SEPARATOR))
        }
        Value::Object(map) => (!map.is_empty()).then(|| value.to_string()),
    }
}
