//! # AI Command
//!
//! Handles `ai '<json>'`: relays the prompt to the agent endpoint when an
//! agent id is configured (chat otherwise), then previews or applies the
//! actions in the reply.

use crate::application::applier::ActionApplier;
use crate::application::parsing;
use crate::domain::config::AppConfig;
use crate::domain::result::OpResult;
use crate::domain::traits::ModelRelay;
use crate::strings::messages;
use serde_json::Value;

pub async fn handle_ai(
    config: &AppConfig,
    relay: &dyn ModelRelay,
    applier: &ActionApplier,
    args: &[String],
) -> OpResult {
    let text = args.join(" ");
    if text.trim().is_empty() {
        return OpResult::error(messages::AI_USAGE);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(prompt) => ask(config, relay, applier, &prompt).await,
        Err(e) => OpResult::error(messages::invalid_prompt_json(&e.to_string())),
    }
}

/// Send an already parsed prompt and handle the reply.
pub async fn ask(
    config: &AppConfig,
    relay: &dyn ModelRelay,
    applier: &ActionApplier,
    prompt: &Value,
) -> OpResult {
    let reply = match &config.api.agent_id {
        Some(agent_id) => relay.ask_agent(agent_id, prompt).await,
        None => relay.ask_chat(prompt).await,
    };

    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("Model request failed: {}", e);
            return OpResult::from(e);
        }
    };

    let result = OpResult::ok(messages::MODEL_REPLIED).with("reply", reply.clone());
    let Some(actions) = parsing::reply_actions(&reply) else {
        return result;
    };

    if config.actions.auto_apply {
        tracing::info!("Auto-applying {} actions", actions.len());
        let applied: Vec<Value> = applier
            .apply_all(&actions)
            .await
            .iter()
            .map(OpResult::to_value)
            .collect();
        result.with("applied", applied)
    } else {
        result
            .with("preview", parsing::previews(&actions))
            .with("hint", messages::AUTO_APPLY_HINT)
    }
}
