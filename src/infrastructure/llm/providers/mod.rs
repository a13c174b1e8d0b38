//! # Relay Providers
//!
//! HTTP plumbing for the two model endpoints:
//! - `openai`: OpenAI-compatible chat completions (Mistral, Codestral)
//! - `agents`: Mistral agents completions

pub mod agents;
pub mod openai;

use crate::domain::config::ApiConfig;
use crate::domain::error::RelayError;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Configuration for a provider call
#[derive(Clone)]
pub struct ProviderConfig {
    /// API key
    pub api_key: String,
    /// Base URL, without a trailing slash
    pub base_url: String,
    /// Model for chat completions
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Timeout in seconds
    pub timeout: u64,
}

impl ProviderConfig {
    pub fn from_api_config(config: &ApiConfig) -> Result<Self, RelayError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(RelayError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: config.url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: config.timeout_secs,
        })
    }
}

/// HTTP client reused across requests
fn http_client() -> &'static Client {
    use std::sync::OnceLock;
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// POST a JSON body to `<base_url><path>` and return the decoded JSON reply.
pub(crate) async fn post_json<B: Serialize>(
    config: &ProviderConfig,
    path: &str,
    body: &B,
) -> Result<Value, RelayError> {
    let url = format!("{}{}", config.base_url, path);
    tracing::info!("POST {}", url);

    let response = http_client()
        .post(&url)
        .header("Authorization", format!("Bearer {}", config.api_key))
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(config.timeout))
        .json(body)
        .send()
        .await
        .map_err(|e| RelayError::Http(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| RelayError::Http(format!("Unable to read response body: {e}")))?;

    if !status.is_success() {
        tracing::warn!("{} returned HTTP {}", url, status);
        return Err(RelayError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    serde_json::from_str(&text).map_err(|_| RelayError::InvalidJson {
        source_label: "API".to_string(),
        raw: text,
    })
}
