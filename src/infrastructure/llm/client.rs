//! # Relay Client
//!
//! Provides the `Client` struct, the `ModelRelay` implementation used by the
//! dispatcher and the plugins. It holds the API settings read at startup and
//! routes each prompt to the chat or agents provider.

use crate::domain::config::ApiConfig;
use crate::domain::error::RelayError;
use crate::domain::traits::ModelRelay;
use crate::infrastructure::llm::providers::{self, ProviderConfig};
use crate::infrastructure::llm::types::Context;
use crate::strings::prompts;
use async_trait::async_trait;
use serde_json::Value;

/// HTTP-backed model relay
pub struct Client {
    api: ApiConfig,
}

impl Client {
    /// Create a new client from the API section of the configuration
    pub fn new(api: ApiConfig) -> Self {
        Self { api }
    }

    fn provider_config(&self) -> Result<ProviderConfig, RelayError> {
        ProviderConfig::from_api_config(&self.api)
    }
}

#[async_trait]
impl ModelRelay for Client {
    async fn ask_chat(&self, prompt: &Value) -> Result<Value, RelayError> {
        let config = self.provider_config()?;
        let context = Context::new()
            .add_system_message(prompts::SYSTEM_PROMPT)
            .add_user_message(prompt.to_string())
            .with_temperature(config.temperature);

        tracing::debug!("Asking model {}", config.model);
        providers::openai::chat(config, context).await
    }

    async fn ask_agent(&self, agent_id: &str, prompt: &Value) -> Result<Value, RelayError> {
        let config = self.provider_config()?;
        tracing::debug!("Asking agent {}", agent_id);
        providers::agents::complete(config, agent_id, prompt.to_string()).await
    }
}
