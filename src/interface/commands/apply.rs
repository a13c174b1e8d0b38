//! # Apply Command
//!
//! Handles `apply <actions.json>`: validates and applies a batch of actions
//! read from a file, one result per action.

use crate::application::applier::ActionApplier;
use crate::application::parsing;
use crate::domain::result::OpResult;
use crate::infrastructure::tools::fs::FsAdapter;
use crate::strings::messages;
use serde_json::Value;

pub async fn handle_apply(fs: &FsAdapter, applier: &ActionApplier, args: &[String]) -> OpResult {
    let Some(file) = args.first().filter(|a| !a.is_empty()) else {
        return OpResult::error(messages::APPLY_USAGE);
    };

    let text = match fs.read_text(file).await {
        Ok(text) => text,
        Err(e) => return OpResult::from_error(&e),
    };

    let actions = match parsing::parse_actions_file(&text) {
        Ok(actions) => actions,
        Err(message) => return OpResult::error(message),
    };

    tracing::info!("Applying {} actions from {}", actions.len(), file);
    let results: Vec<Value> = applier
        .apply_all(&actions)
        .await
        .iter()
        .map(OpResult::to_value)
        .collect();

    OpResult::ok(messages::actions_processed(results.len())).with("results", results)
}
