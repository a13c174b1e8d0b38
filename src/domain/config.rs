//! # Configuration
//!
//! Builds the application's configuration once at startup from the flat
//! settings store, environment overrides and CLI flags. The resulting
//! [`AppConfig`] is passed explicitly into the relay and the dispatcher.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.mistral.ai/v1";
pub const DEFAULT_MODEL: &str = "codestral-latest";
pub const DEFAULT_IGNORE: &[&str] = &["node_modules", ".git", "vendor", "dist", "build", "target"];

/// Keys accepted by `config set`, with a short description for `config list`.
pub const SETTING_KEYS: &[(&str, &str)] = &[
    ("api_url", "Base URL of the model API"),
    ("api_key", "Bearer token for the model API"),
    ("agent_id", "Agent id; when set, prompts go to the agents endpoint"),
    ("model", "Model used for chat completions"),
    ("temperature", "Sampling temperature for chat completions"),
    ("timeout_secs", "HTTP timeout for model requests"),
    ("auto_apply", "Apply actions from model replies without asking (true/false)"),
    ("command_timeout_secs", "Timeout for run_command actions and patch"),
    ("patch_program", "External program used for unified patches"),
    ("patch_file", "Temporary file the diff is written to before patching"),
    ("ignore", "Comma separated directory names skipped by project walks"),
];

/// Environment variables read once at startup, mapped to setting keys.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("MISTRAL_API_URL", "api_url"),
    ("MISTRAL_API_KEY", "api_key"),
    ("MISTRAL_AGENT_ID", "agent_id"),
    ("MISTRAL_MODEL", "model"),
    ("AUTO_APPLY", "auto_apply"),
];

pub fn is_known_key(key: &str) -> bool {
    SETTING_KEYS.iter().any(|(k, _)| *k == key)
}

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub actions: ActionsConfig,
    pub workspace: WorkspaceConfig,
}

/// Remote model API settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub agent_id: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

/// Settings of the action pipeline.
#[derive(Debug, Clone)]
pub struct ActionsConfig {
    pub auto_apply: bool,
    pub command_timeout_secs: u64,
    pub patch_program: String,
    pub patch_file: PathBuf,
}

/// Where relative paths resolve and which directories walks skip.
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    pub root: PathBuf,
    pub ignore: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            api_key: None,
            agent_id: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            timeout_secs: 120,
        }
    }
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            auto_apply: false,
            command_timeout_secs: 120,
            patch_program: "patch".to_string(),
            patch_file: std::env::temp_dir().join("gendev_patch.diff"),
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Build from stored settings, then apply process environment overrides.
    /// Entries that fail to parse are skipped with a warning.
    pub fn load(settings: &BTreeMap<String, String>) -> Self {
        let mut merged = settings.clone();
        for (var, key) in ENV_OVERRIDES {
            if let Ok(raw) = std::env::var(var)
                && let Some(value) = env_value(var, &raw)
            {
                merged.insert(key.to_string(), value);
            }
        }
        Self::from_stored(&merged)
    }

    /// Build from flat key/value pairs. Unset keys keep their defaults and a
    /// bad entry only loses itself.
    pub fn from_stored(settings: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        for (key, value) in settings {
            if let Err(e) = config.set(key, value) {
                tracing::warn!("Skipping setting {}: {:#}", key, e);
            }
        }
        config
    }

    /// Apply one setting by key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => self.api.url = value.trim_end_matches('/').to_string(),
            "api_key" => self.api.api_key = non_empty(value),
            "agent_id" => self.api.agent_id = non_empty(value),
            "model" => self.api.model = value.to_string(),
            "temperature" => {
                self.api.temperature = value
                    .parse()
                    .with_context(|| format!("Invalid temperature: {value}"))?
            }
            "timeout_secs" => {
                self.api.timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid timeout_secs: {value}"))?
            }
            "auto_apply" => self.actions.auto_apply = parse_flag(value),
            "command_timeout_secs" => {
                self.actions.command_timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid command_timeout_secs: {value}"))?
            }
            "patch_program" => self.actions.patch_program = value.to_string(),
            "patch_file" => self.actions.patch_file = PathBuf::from(value),
            "ignore" => {
                self.workspace.ignore = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            }
            _ => anyhow::bail!("Unknown config key: {key}"),
        }
        Ok(())
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace.root = root.into();
        self
    }

    pub fn with_auto_apply(mut self, enabled: bool) -> Self {
        self.actions.auto_apply = enabled;
        self
    }
}

/// `1`, `true`, `yes` and `on` enable a flag; anything else disables it.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Setting value carried by an environment variable. `AUTO_APPLY` only
/// counts when it is exactly `1`.
fn env_value(var: &str, raw: &str) -> Option<String> {
    let value = raw.trim();
    match var {
        "AUTO_APPLY" => (value == "1").then(|| "true".to_string()),
        _ => (!value.is_empty()).then(|| value.to_string()),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_stored(&BTreeMap::new());
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.api.model, DEFAULT_MODEL);
        assert!(config.api.api_key.is_none());
        assert!(!config.actions.auto_apply);
        assert_eq!(config.actions.command_timeout_secs, 120);
        assert!(config.workspace.ignore.contains(&"node_modules".to_string()));
    }

    #[test]
    fn test_settings_override_defaults() {
        let config = AppConfig::from_stored(&settings(&[
            ("api_url", "http://localhost:8080/v1/"),
            ("agent_id", "ag:1234"),
            ("auto_apply", "1"),
            ("ignore", "target, .git,,"),
        ]));

        assert_eq!(config.api.url, "http://localhost:8080/v1");
        assert_eq!(config.api.agent_id.as_deref(), Some("ag:1234"));
        assert!(config.actions.auto_apply);
        assert_eq!(config.workspace.ignore, vec!["target", ".git"]);
    }

    #[test]
    fn test_rejects_bad_values_and_unknown_keys() {
        assert!(AppConfig::default().set("timeout_secs", "soon").is_err());
        assert!(AppConfig::default().set("colour", "blue").is_err());
    }

    #[test]
    fn test_stored_settings_skip_only_bad_entries() {
        let config = AppConfig::from_stored(&settings(&[
            ("api_key", "sk-stored"),
            ("timeout_secs", "soon"),
            ("colour", "blue"),
            ("model", "mistral-small"),
        ]));

        assert_eq!(config.api.api_key.as_deref(), Some("sk-stored"));
        assert_eq!(config.api.model, "mistral-small");
        assert_eq!(config.api.timeout_secs, 120);
    }

    #[test]
    fn test_auto_apply_env_needs_exactly_one() {
        assert_eq!(env_value("AUTO_APPLY", "1"), Some("true".to_string()));
        assert_eq!(env_value("AUTO_APPLY", " 1 "), Some("true".to_string()));
        assert_eq!(env_value("AUTO_APPLY", "true"), None);
        assert_eq!(env_value("AUTO_APPLY", "yes"), None);
        assert_eq!(env_value("AUTO_APPLY", "0"), None);
        assert_eq!(env_value("MISTRAL_MODEL", " small "), Some("small".to_string()));
        assert_eq!(env_value("MISTRAL_API_KEY", ""), None);
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = AppConfig::from_stored(&settings(&[("api_key", "  ")]));
        assert!(config.api.api_key.is_none());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_every_env_override_maps_to_a_known_key() {
        for (_, key) in ENV_OVERRIDES {
            assert!(is_known_key(key));
        }
    }
}
