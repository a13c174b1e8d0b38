//! Plugin commands, registered in one closed table.
//!
//! Each plugin implements [`CommandHandler`] and takes an optional target
//! directory as its first argument (default `.`).

pub mod analyze;
pub mod deploy;
pub mod deps;
pub mod secrets;
pub mod testgen;

use crate::domain::traits::{CommandHandler, ModelRelay};
use crate::infrastructure::tools::fs::FsAdapter;
use serde_json::Value;
use std::sync::Arc;

/// Registry of all available plugins
pub struct PluginRegistry {
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl PluginRegistry {
    pub fn new(fs: FsAdapter, relay: Arc<dyn ModelRelay>) -> Self {
        Self {
            handlers: vec![
                Box::new(analyze::AnalyzePlugin::new(fs.clone())),
                Box::new(secrets::SecretsPlugin::new(fs.clone())),
                Box::new(deps::DepsPlugin::new(fs.clone())),
                Box::new(deploy::DeployPlugin::new(fs.clone(), relay.clone())),
                Box::new(testgen::TestGenPlugin::new(fs, relay)),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.handlers
            .iter()
            .find(|h| h.name() == name)
            .map(|h| h.as_ref())
    }

    /// `(name, description)` of every plugin, in registration order.
    pub fn catalog(&self) -> Vec<(&'static str, &'static str)> {
        self.handlers
            .iter()
            .map(|h| (h.name(), h.description()))
            .collect()
    }
}

/// First argument, or the current directory.
pub(crate) fn target_dir(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or(".")
}

/// Join `name` onto the plugin's target directory, keeping `.` out of the result.
pub(crate) fn join(dir: &str, name: &str) -> String {
    if dir == "." || dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), name)
    }
}

/// First non-empty string among `keys` in a model reply, unless the reply
/// reports `status: "error"`.
pub(crate) fn reply_field(reply: &Value, keys: &[&str]) -> Option<String> {
    if reply.get("status").and_then(Value::as_str) == Some("error") {
        return None;
    }
    keys.iter()
        .filter_map(|k| reply.get(*k).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(String::from)
}

#[cfg(test)]
pub(crate) mod fake_relay {
    use crate::domain::error::RelayError;
    use crate::domain::traits::ModelRelay;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Relay returning a canned reply and recording every prompt it was given.
    pub struct FakeRelay {
        reply: Result<Value, String>,
        pub prompts: Mutex<Vec<Value>>,
        pub agent_ids: Mutex<Vec<String>>,
    }

    impl FakeRelay {
        pub fn replying(reply: Value) -> Self {
            Self {
                reply: Ok(reply),
                prompts: Mutex::new(Vec::new()),
                agent_ids: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
                agent_ids: Mutex::new(Vec::new()),
            }
        }

        pub fn prompt_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        fn answer(&self, prompt: &Value) -> Result<Value, RelayError> {
            self.prompts.lock().unwrap().push(prompt.clone());
            self.reply.clone().map_err(RelayError::Http)
        }
    }

    #[async_trait]
    impl ModelRelay for FakeRelay {
        async fn ask_chat(&self, prompt: &Value) -> Result<Value, RelayError> {
            self.answer(prompt)
        }

        async fn ask_agent(&self, agent_id: &str, prompt: &Value) -> Result<Value, RelayError> {
            self.agent_ids.lock().unwrap().push(agent_id.to_string());
            self.answer(prompt)
        }
    }
}
