//! # Help Command
//!
//! Handles `help`.
//! Lists the built-in commands, the registered plugins and the templates.

use crate::application::plugins::PluginRegistry;
use crate::application::templates;
use crate::domain::result::OpResult;
use crate::strings::help;
use serde_json::{Value, json};

pub fn handle_help(plugins: &PluginRegistry) -> OpResult {
    let commands: Vec<Value> = help::COMMANDS
        .iter()
        .map(|(usage, description)| json!({"usage": usage, "description": description}))
        .collect();
    let plugins: Vec<Value> = plugins
        .catalog()
        .into_iter()
        .map(|(name, description)| json!({"usage": format!("{name} [path]"), "description": description}))
        .collect();

    OpResult::ok(help::NAME)
        .with("usage", help::USAGE)
        .with("commands", commands)
        .with("plugins", plugins)
        .with("templates", templates::available())
}
