//! Mistral agents completions
//!
//! Same bearer auth as chat; the agent carries its own model and instructions.

use serde::Serialize;
use serde_json::Value;

use super::{ProviderConfig, post_json};
use crate::domain::error::RelayError;
use crate::infrastructure::llm::types::{Message, parse_reply};

#[derive(Debug, Serialize)]
struct AgentRequest<'a> {
    agent_id: &'a str,
    messages: Vec<Message>,
}

/// Send `input` to the agent and parse its answer as JSON.
pub async fn complete(
    config: ProviderConfig,
    agent_id: &str,
    input: String,
) -> Result<Value, RelayError> {
    let request = AgentRequest {
        agent_id,
        messages: vec![Message::user(input)],
    };

    let data = post_json(&config, "/agents/completions", &request).await?;
    let text = reply_text(&data).ok_or_else(|| RelayError::EmptyReply("agent".to_string()))?;
    parse_reply(text, "agent")
}

/// Chat-style `choices` first, then the older `output[].content[].text` shape.
fn reply_text(data: &Value) -> Option<&str> {
    data.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .or_else(|| {
            data.pointer("/output/0/content/0/text")
                .and_then(Value::as_str)
        })
}
