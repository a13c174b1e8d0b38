//! OpenAI-compatible chat completions
//!
//! Mistral and Codestral expose the same `/chat/completions` shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ProviderConfig, post_json};
use crate::domain::error::RelayError;
use crate::infrastructure::llm::types::{Context, Message, parse_reply};

/// Chat completions request format
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Chat completions response format
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Execute a chat request and parse the first choice as JSON.
pub async fn chat(config: ProviderConfig, context: Context) -> Result<Value, RelayError> {
    let request = ChatRequest {
        model: &config.model,
        messages: &context.messages,
        temperature: context.temperature,
    };

    let data = post_json(&config, "/chat/completions", &request).await?;
    let content = reply_text(data)?;
    parse_reply(&content, "model")
}

fn reply_text(data: Value) -> Result<String, RelayError> {
    let raw = data.to_string();
    let response: ChatResponse = serde_json::from_value(data).map_err(|_| RelayError::InvalidJson {
        source_label: "API".to_string(),
        raw,
    })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| RelayError::EmptyReply("model".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::providers::fake_server;
    use serde_json::json;

    fn config(base_url: String) -> ProviderConfig {
        ProviderConfig {
            api_key: "test-key".into(),
            base_url,
            model: "codestral-latest".into(),
            temperature: 0.2,
            timeout: 5,
        }
    }

    #[test]
    fn test_request_shape() {
        let context = Context::new()
            .add_system_message("sys")
            .add_user_message("{\"task\":\"x\"}")
            .with_temperature(0.2);
        let request = ChatRequest {
            model: "codestral-latest",
            messages: &context.messages,
            temperature: context.temperature,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "codestral-latest");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "{\"task\":\"x\"}");
    }

    #[test]
    fn test_reply_without_choices_is_empty() {
        assert!(matches!(
            reply_text(json!({"choices": []})),
            Err(RelayError::EmptyReply(_))
        ));
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let reply = json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"status\":\"ok\",\"actions\":[]}"}}]
        });
        let (url, server) = fake_server::serve_once(200, &reply.to_string()).await;

        let context = Context::new().add_user_message("{}");
        let value = chat(config(url), context).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(value, json!({"status": "ok", "actions": []}));
        assert!(request.starts_with("POST /chat/completions"));
        assert!(request.to_lowercase().contains("authorization: bearer test-key"));
    }

    #[tokio::test]
    async fn test_chat_invalid_model_json() {
        let reply = json!({"choices": [{"message": {"content": "I cannot do that"}}]});
        let (url, server) = fake_server::serve_once(200, &reply.to_string()).await;

        let err = chat(config(url), Context::new()).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, RelayError::InvalidJson { ref raw, .. } if raw == "I cannot do that"));
    }
}
