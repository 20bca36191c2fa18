use serde::Deserialize;
use serde_json::Value;

use crate::vendor::requests::assistant::{ContentPart, ThreadMessage, ROLE_ASSISTANT};

pub const EMPTY_REPLY: &str = "Пустой ответ";

/// Text of the newest assistant message in a newest-first listing.
pub fn latest_assistant_reply(messages: &[ThreadMessage]) -> String {
    match messages.iter().find(|m| m.role == ROLE_ASSISTANT) {
        Some(message) => content_text(&message.content),
        None => EMPTY_REPLY.to_string(),
    }
}

/// Joins every text part with newlines. Content that does not parse as parts, or
/// yields no text, falls back to the first part's text value and then to "".
pub fn content_text(content: &Value) -> String {
    if let Ok(parts) = Vec::<ContentPart>::deserialize(content) {
        let texts: Vec<&str> = parts.iter().filter_map(ContentPart::text).collect();
        if !texts.is_empty() {
            return texts.join("\n").trim().to_string();
        }
    }

    first_part_text(content).trim().to_string()
}

fn first_part_text(content: &Value) -> &str {
    let Some(text) = content.get(0).and_then(|part| part.get("text")) else {
        return "";
    };
    text.get("value")
        .and_then(Value::as_str)
        .or_else(|| text.as_str())
        .unwrap_or_default()
}
