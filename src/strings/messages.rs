//! # Messages
//!
//! Contains constant strings and format functions for result messages.
//! Includes validation errors, action outcomes and usage hints.

// Filesystem adapter
pub fn file_read(path: &str) -> String {
    format!("Read {path}")
}

pub fn dir_listed(path: &str, count: usize) -> String {
    format!("{count} entries in {path}")
}

pub fn file_created(path: &str) -> String {
    format!("File created: {path}")
}

pub fn folder_created(path: &str) -> String {
    format!("Folder created: {path}")
}

pub fn folder_exists(path: &str) -> String {
    format!("Folder exists: {path}")
}

pub fn path_deleted(path: &str) -> String {
    format!("Deleted: {path}")
}

pub fn search_done(term: &str, count: usize) -> String {
    format!("{count} files contain '{term}'")
}

pub fn project_walked(count: usize) -> String {
    format!("{count} files found")
}

// Validator
pub fn unknown_action_type(action_type: &str) -> String {
    format!("Unknown action type: {action_type}")
}

pub fn missing_field(field: &str) -> String {
    format!("Missing required field: {field}")
}

pub fn path_traversal(path: &str) -> String {
    format!("Path traversal not allowed: {path}")
}

pub fn dangerous_command(command: &str) -> String {
    format!("Dangerous command blocked: {command}")
}

// Applier
pub fn action_created(path: &str) -> String {
    format!("created {path}")
}

pub fn action_patched(path: &str) -> String {
    format!("applied patch to {path}")
}

pub fn action_replaced(path: &str) -> String {
    format!("replaced {path}")
}

pub fn action_deleted(path: &str) -> String {
    format!("deleted {path}")
}

pub fn action_file_not_found(path: &str) -> String {
    format!("file not found: {path}")
}

pub fn command_ran(command: &str) -> String {
    format!("ran {command}")
}

pub fn command_failed(command: &str) -> String {
    format!("Command failed: {command}")
}

pub fn patch_failed(path: &str) -> String {
    format!("Patch failed for {path}")
}

// Dispatcher
pub fn unknown_command(cmd: &str) -> String {
    format!("unknown command: {cmd}")
}

pub fn invalid_prompt_json(err: &str) -> String {
    format!("Invalid JSON prompt: {err}")
}

pub fn invalid_actions_json(err: &str) -> String {
    format!("Invalid JSON in actions file: {err}")
}

pub fn actions_processed(total: usize) -> String {
    format!("processed {total} actions")
}

pub const ACTIONS_NOT_ARRAY: &str = "Actions file should contain an array of actions";
pub const MODEL_REPLIED: &str = "model replied";
pub const AUTO_APPLY_HINT: &str = "Actions were not applied. Set AUTO_APPLY=1 to apply them automatically, or save them to a file and run `gendev apply <file>`.";

pub const READ_USAGE: &str = "Usage: read <file_path>";
pub const MKFILE_USAGE: &str = "Usage: mkfile <path> [content]";
pub const MKDIR_USAGE: &str = "Usage: mkdir <path>";
pub const RM_USAGE: &str = "Usage: rm <path>";
pub const SEARCH_USAGE: &str = "Usage: search <term>";
pub const AI_USAGE: &str = "Usage: ai '<json prompt>'";
pub const APPLY_USAGE: &str = "Usage: apply <actions.json>";
pub const CONFIG_USAGE: &str = "Usage: config get <key> | set <key> <value> | list | reset";
pub const TEMPLATE_USAGE: &str = "Usage: template <type> <framework> <name> [output_dir]";

// Config
pub fn config_value(key: &str, value: &str) -> String {
    format!("{key} = {value}")
}

pub fn config_unset(key: &str) -> String {
    format!("{key} is not set")
}

pub fn config_updated(key: &str) -> String {
    format!("{key} updated")
}

pub const CONFIG_RESET: &str = "settings reset to defaults";
pub const CONFIG_LISTED: &str = "current settings";

// Templates
pub fn template_not_found(kind: &str, framework: &str) -> String {
    format!("Template not found: {kind}/{framework}")
}

pub fn template_created(path: &str) -> String {
    format!("Generated {path}")
}

// Plugins
pub fn analysis_done(path: &str) -> String {
    format!("Analysis of {path} complete")
}

pub fn secrets_scanned(count: usize) -> String {
    format!("{count} potential secrets found")
}

pub fn deps_checked(count: usize) -> String {
    format!("{count} vulnerable dependencies found")
}

pub const NO_PACKAGE_JSON: &str = "No package.json found - not a Node.js project";
pub const INVALID_PACKAGE_JSON: &str = "Invalid package.json format";
pub const DEPLOY_READY: &str = "Deployment configuration generated";

pub fn tests_generated(count: usize) -> String {
    format!("Generated {count} test files")
}
