//! # Settings Store
//!
//! Flat key/value settings persisted as YAML under the user's config
//! directory (`~/.config/gendev/settings.yaml` on Linux).

use crate::domain::config::is_known_key;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub type Settings = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config directory, falling back to the working directory.
    pub fn default_location() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("gendev").join("settings.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all settings. A missing file is an empty store.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Settings::new());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        if !is_known_key(key) {
            anyhow::bail!("Unknown config key: {key}");
        }
        let mut settings = self.load()?;
        settings.insert(key.to_string(), value.to_string());
        self.save(&settings)?;
        tracing::info!("Setting {} updated", key);
        Ok(())
    }

    /// Remove every stored setting so defaults apply again.
    pub fn reset(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        tracing::info!("Settings reset");
        Ok(())
    }
}
