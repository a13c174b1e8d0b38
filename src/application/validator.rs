//! # Action Validator
//!
//! Checks a wire [`Action`] against the required fields of its type and the
//! per-type policy guards, producing the closed [`ActionKind`] on success.
//!
//! The guards are intentionally simple substring checks: `..` anywhere in a
//! `create_file` path and the literal `rm -rf /` in a command.

use crate::domain::types::{Action, ActionKind, ActionType, PatchFormat};
use crate::strings::messages;
use serde::Serialize;

const TRAVERSAL_MARKER: &str = "..";
const BLOCKED_COMMANDS: &[&str] = &["rm -rf /"];

/// `{valid, error?}` view of a validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&Result<ActionKind, String>> for Validation {
    fn from(result: &Result<ActionKind, String>) -> Self {
        match result {
            Ok(_) => Validation {
                valid: true,
                error: None,
            },
            Err(e) => Validation {
                valid: false,
                error: Some(e.clone()),
            },
        }
    }
}

/// Validate an action. The error is the message shown to the user.
pub fn validate(action: &Action) -> Result<ActionKind, String> {
    let action_type = ActionType::from_str(&action.action_type)
        .ok_or_else(|| messages::unknown_action_type(&action.action_type))?;

    if let Some(field) = action_type
        .required_fields()
        .iter()
        .find(|f| action.field(f).is_none())
    {
        return Err(messages::missing_field(field));
    }

    // Required fields are present past this point.
    let text = |name: &str| action.field(name).unwrap_or_default().to_string();

    let kind = match action_type {
        ActionType::CreateFile => {
            let path = text("path");
            if path.contains(TRAVERSAL_MARKER) {
                return Err(messages::path_traversal(&path));
            }
            ActionKind::CreateFile {
                path,
                content: action.content.clone().unwrap_or_default(),
            }
        }
        ActionType::PatchFile => ActionKind::PatchFile {
            path: text("path"),
            content: text("content"),
            format: PatchFormat::from_field(action.field("patchFormat")),
        },
        ActionType::DeleteFile => ActionKind::DeleteFile { path: text("path") },
        ActionType::RunCommand => {
            let command = text("command");
            if BLOCKED_COMMANDS.iter().any(|b| command.contains(b)) {
                return Err(messages::dangerous_command(&command));
            }
            ActionKind::RunCommand {
                command,
                cwd: action.field("cwd").map(String::from),
            }
        }
    };

    Ok(kind)
}

/// Validation outcome in its `{valid, error}` form.
pub fn check(action: &Action) -> Validation {
    Validation::from(&validate(action))
}
