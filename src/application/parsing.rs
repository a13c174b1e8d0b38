//! # Parsing Utils
//!
//! Utilities for pulling candidate actions out of model replies and actions
//! files, and for building the previews shown when they are not applied.

use crate::application::validator;
use crate::domain::types::Action;
use crate::strings::messages;
use serde_json::Value;

/// Text of one wire field. Numbers and booleans are stringified; `null`,
/// arrays and objects count as absent.
fn field_text(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => {
            tracing::warn!("Ignoring non-scalar `{}` in action: {}", key, other);
            None
        }
    }
}

/// Decode one array item field by field, so one badly typed field does not
/// hide the others from the validator.
fn to_action(item: &Value) -> Action {
    if !item.is_object() {
        tracing::warn!("Malformed action {}", item);
        return Action::default();
    }
    Action {
        action_type: field_text(item, "type").unwrap_or_default(),
        path: field_text(item, "path"),
        content: field_text(item, "content"),
        patch_format: field_text(item, "patchFormat"),
        command: field_text(item, "command"),
        cwd: field_text(item, "cwd"),
    }
}

/// Actions carried by a model reply. `None` unless `actions` is a non-empty array.
pub fn reply_actions(reply: &Value) -> Option<Vec<Action>> {
    match reply.get("actions") {
        Some(Value::Array(items)) if !items.is_empty() => {
            Some(items.iter().map(to_action).collect())
        }
        _ => None,
    }
}

/// Parse the contents of an actions file. The error is the user-facing message.
pub fn parse_actions_file(text: &str) -> Result<Vec<Action>, String> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| messages::invalid_actions_json(&e.to_string()))?;

    match value {
        Value::Array(items) => Ok(items.iter().map(to_action).collect()),
        _ => Err(messages::ACTIONS_NOT_ARRAY.to_string()),
    }
}

/// `{type, path, valid, error?}` for each action, so a preview shows what
/// `apply` would reject.
pub fn previews(actions: &[Action]) -> Vec<Value> {
    actions
        .iter()
        .map(|action| {
            let mut preview = action.preview();
            if let (Some(fields), Ok(Value::Object(validation))) = (
                preview.as_object_mut(),
                serde_json::to_value(validator::check(action)),
            ) {
                fields.extend(validation);
            }
            preview
        })
        .collect()
}
