//! # Domain Types
//!
//! Actions as they arrive from the model or an actions file, and the closed
//! set of action kinds the applier understands.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The four action types. Anything else is rejected by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    CreateFile,
    PatchFile,
    DeleteFile,
    RunCommand,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::CreateFile => "create_file",
            ActionType::PatchFile => "patch_file",
            ActionType::DeleteFile => "delete_file",
            ActionType::RunCommand => "run_command",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "create_file" => Some(ActionType::CreateFile),
            "patch_file" => Some(ActionType::PatchFile),
            "delete_file" => Some(ActionType::DeleteFile),
            "run_command" => Some(ActionType::RunCommand),
            _ => None,
        }
    }

    /// Fields that must be present and non-empty, in the order they are checked.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            ActionType::CreateFile => &["path"],
            ActionType::PatchFile => &["path", "content"],
            ActionType::DeleteFile => &["path"],
            ActionType::RunCommand => &["command"],
        }
    }
}

/// A single mutation as received on the wire.
///
/// Every field is optional here; the validator decides what a given `type`
/// actually needs and produces an [`ActionKind`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type", default)]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "patchFormat", default, skip_serializing_if = "Option::is_none")]
    pub patch_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl Action {
    /// Looks up a field by its wire name. Empty strings count as absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "type" => Some(self.action_type.as_str()),
            "path" => self.path.as_deref(),
            "content" => self.content.as_deref(),
            "patchFormat" => self.patch_format.as_deref(),
            "command" => self.command.as_deref(),
            "cwd" => self.cwd.as_deref(),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }

    /// `{type, path, command?}` shown when actions are previewed instead of applied.
    pub fn preview(&self) -> Value {
        let mut preview = json!({
            "type": self.action_type,
            "path": self.path,
        });
        if let Some(command) = &self.command {
            preview["command"] = json!(command);
        }
        preview
    }
}

/// How a `patch_file` body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchFormat {
    /// A unified diff handed to the external `patch` utility.
    Unified,
    /// The body is the new file content.
    Replace,
}

impl PatchFormat {
    pub fn from_field(value: Option<&str>) -> Self {
        match value {
            Some("unified") => PatchFormat::Unified,
            _ => PatchFormat::Replace,
        }
    }
}

/// A validated action carrying exactly the data its effect needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    CreateFile {
        path: String,
        content: String,
    },
    PatchFile {
        path: String,
        content: String,
        format: PatchFormat,
    },
    DeleteFile {
        path: String,
    },
    RunCommand {
        command: String,
        cwd: Option<String>,
    },
}

impl ActionKind {
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionKind::CreateFile { .. } => ActionType::CreateFile,
            ActionKind::PatchFile { .. } => ActionType::PatchFile,
            ActionKind::DeleteFile { .. } => ActionType::DeleteFile,
            ActionKind::RunCommand { .. } => ActionType::RunCommand,
        }
    }
}
