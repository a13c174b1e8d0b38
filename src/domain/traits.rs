//! # Domain Traits
//!
//! Abstract interfaces for the model relay and for plugin commands.
//! Implementations live in the infrastructure and application layers.

use crate::domain::error::RelayError;
use crate::domain::result::OpResult;
use async_trait::async_trait;
use serde_json::Value;

/// Forwards structured prompts to the remote model and parses its JSON reply.
#[async_trait]
pub trait ModelRelay: Send + Sync {
    /// One round trip to the chat-completions endpoint.
    async fn ask_chat(&self, prompt: &Value) -> Result<Value, RelayError>;

    /// One round trip to the agents endpoint for `agent_id`.
    async fn ask_agent(&self, agent_id: &str, prompt: &Value) -> Result<Value, RelayError>;
}

/// A named command registered in the plugin table.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    async fn execute(&self, args: &[String]) -> OpResult;
}
