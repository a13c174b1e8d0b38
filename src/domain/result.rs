//! # Operation Result
//!
//! The `{status, message, ...}` record that every command, filesystem call and
//! model request is normalised into before it reaches the user.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// Uniform success/error response.
///
/// Extra fields are flattened next to `status` and `message` when serialised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpResult {
    pub status: Status,
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OpResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            message: message.into(),
            extra: Map::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            extra: Map::new(),
        }
    }

    /// Error result carrying the full context chain of an `anyhow` error.
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self::error(format!("{err:#}"))
    }

    /// Attach an extra field. `status` and `message` cannot be overridden.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        if key != "status" && key != "message" {
            self.extra.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Collapse a fallible operation into a result, keeping the error chain.
pub fn settle(result: anyhow::Result<OpResult>) -> OpResult {
    result.unwrap_or_else(|e| OpResult::from_error(&e))
}
