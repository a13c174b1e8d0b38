//! Simple types for the model relay

use crate::domain::error::RelayError;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// A chat message
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Context for one model request
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub messages: Vec<Message>,
    pub temperature: Option<f32>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn add_system_message(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::system(content));
        self
    }

    pub fn add_user_message(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\r?\n?\s*```\s*$")
            .expect("fence regex is valid")
    })
}

/// Strip a surrounding Markdown code fence, if any.
pub fn strip_code_fence(text: &str) -> &str {
    match fence_regex().captures(text).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => text.trim(),
    }
}

/// Parse the model's reply text as JSON.
///
/// Fenced replies are unwrapped first. Anything that still fails to parse is
/// returned as [`RelayError::InvalidJson`] with the raw text.
pub fn parse_reply(text: &str, source_label: &str) -> Result<Value, RelayError> {
    if text.trim().is_empty() {
        return Err(RelayError::EmptyReply(source_label.to_string()));
    }
    serde_json::from_str(strip_code_fence(text)).map_err(|_| RelayError::InvalidJson {
        source_label: source_label.to_string(),
        raw: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json_reply() {
        let value = parse_reply(r#"{"status":"ok","actions":[]}"#, "model").unwrap();
        assert_eq!(value, json!({"status": "ok", "actions": []}));
    }

    #[test]
    fn test_fenced_json_reply() {
        let text = "```json\n{\"answer\": 42}\n```";
        assert_eq!(parse_reply(text, "model").unwrap(), json!({"answer": 42}));
    }

    #[test]
    fn test_fence_without_language() {
        let text = "\n```\n[1, 2]\n```\n";
        assert_eq!(parse_reply(text, "agent").unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_prose_reply_is_invalid_json() {
        match parse_reply("Sure, here is the file.", "agent") {
            Err(RelayError::InvalidJson { source_label, raw }) => {
                assert_eq!(source_label, "agent");
                assert_eq!(raw, "Sure, here is the file.");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_blank_reply() {
        assert!(matches!(
            parse_reply("   ", "model"),
            Err(RelayError::EmptyReply(_))
        ));
    }

    #[test]
    fn test_message_serializes_lowercase_role() {
        let msg = Message::system("be terse");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"role": "system", "content": "be terse"})
        );
    }
}
