//! # Config Command
//!
//! Handles `config get|set|list|reset` against the persistent settings store.
//! Changes take effect on the next start.

use crate::domain::config::{AppConfig, SETTING_KEYS, is_known_key};
use crate::domain::result::{OpResult, settle};
use crate::infrastructure::settings::SettingsStore;
use crate::strings::messages;
use anyhow::Result;
use serde_json::{Map, Value, json};

const SECRET_KEYS: &[&str] = &["api_key"];

/// Keep the first four characters of a secret.
fn mask(value: &str) -> String {
    if value.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", value.chars().take(4).collect::<String>())
    }
}

fn shown(key: &str, value: &str) -> String {
    if SECRET_KEYS.contains(&key) {
        mask(value)
    } else {
        value.to_string()
    }
}

pub fn handle_config(store: &SettingsStore, args: &[String]) -> OpResult {
    settle(run(store, args))
}

fn run(store: &SettingsStore, args: &[String]) -> Result<OpResult> {
    let sub = args.first().map(String::as_str).unwrap_or_default();
    match (sub, args.get(1)) {
        ("get", Some(key)) => {
            if !is_known_key(key) {
                anyhow::bail!("Unknown config key: {key}");
            }
            Ok(match store.get(key)? {
                Some(value) => {
                    let value = shown(key, &value);
                    OpResult::ok(messages::config_value(key, &value))
                        .with("key", key.as_str())
                        .with("value", value)
                }
                None => OpResult::ok(messages::config_unset(key))
                    .with("key", key.as_str())
                    .with("value", Value::Null),
            })
        }
        ("set", Some(key)) if args.len() > 2 => {
            let value = args[2..].join(" ");
            // Reject values the configuration could not load later.
            AppConfig::default().set(key, &value)?;
            store.set(key, &value)?;
            Ok(OpResult::ok(messages::config_updated(key)).with("key", key.as_str()))
        }
        ("list", _) => {
            let stored = store.load()?;
            let mut settings = Map::new();
            for (key, value) in &stored {
                settings.insert(key.clone(), Value::String(shown(key, value)));
            }
            let keys: Vec<Value> = SETTING_KEYS
                .iter()
                .map(|(key, description)| json!({"key": key, "description": description}))
                .collect();
            Ok(OpResult::ok(messages::CONFIG_LISTED)
                .with("path", store.path().to_string_lossy().to_string())
                .with("settings", settings)
                .with("keys", keys))
        }
        ("reset", _) => {
            store.reset()?;
            Ok(OpResult::ok(messages::CONFIG_RESET))
        }
        _ => Ok(OpResult::error(messages::CONFIG_USAGE)),
    }
}
