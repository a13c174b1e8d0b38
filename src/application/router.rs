//! # Command Router
//!
//! Routes a command vector (e.g. `["ls", "src"]`) to the matching handler in
//! `interface/commands` or to a registered plugin, and returns its result.

use std::sync::Arc;

use serde_json::Value;

use crate::application::applier::ActionApplier;
use crate::application::plugins::PluginRegistry;
use crate::domain::config::AppConfig;
use crate::domain::result::OpResult;
use crate::domain::traits::ModelRelay;
use crate::infrastructure::settings::SettingsStore;
use crate::infrastructure::tools::fs::FsAdapter;
use crate::interface::commands;
use crate::strings::messages;

pub struct Dispatcher {
    config: AppConfig,
    relay: Arc<dyn ModelRelay>,
    fs: FsAdapter,
    applier: ActionApplier,
    settings: SettingsStore,
    plugins: PluginRegistry,
}

impl Dispatcher {
    pub fn new(config: AppConfig, relay: Arc<dyn ModelRelay>, settings: SettingsStore) -> Self {
        let fs = FsAdapter::new(
            config.workspace.root.clone(),
            config.workspace.ignore.clone(),
        );
        let applier = ActionApplier::new(fs.clone(), &config.actions);
        let plugins = PluginRegistry::new(fs.clone(), relay.clone());

        Self {
            config,
            relay,
            fs,
            applier,
            settings,
            plugins,
        }
    }

    pub async fn route(&self, argv: &[String]) -> OpResult {
        let Some((cmd, args)) = argv.split_first() else {
            return commands::help::handle_help(&self.plugins);
        };

        tracing::info!("Dispatching cmd='{}' args={:?}", cmd, args);

        match cmd.as_str() {
            "ai" => {
                commands::ai::handle_ai(&self.config, self.relay.as_ref(), &self.applier, args).await
            }
            "apply" => commands::apply::handle_apply(&self.fs, &self.applier, args).await,
            "read" => commands::fs::handle_read(&self.fs, args).await,
            "ls" => commands::fs::handle_ls(&self.fs, args).await,
            "mkfile" => commands::fs::handle_mkfile(&self.fs, args).await,
            "mkdir" => commands::fs::handle_mkdir(&self.fs, args).await,
            "rm" => commands::fs::handle_rm(&self.fs, args).await,
            "project" => commands::fs::handle_project(&self.fs, args),
            "search" => commands::fs::handle_search(&self.fs, args).await,
            "config" => commands::config::handle_config(&self.settings, args),
            "template" => commands::template::handle_template(&self.fs, args).await,
            "help" | "--help" | "-h" => commands::help::handle_help(&self.plugins),
            other => match self.plugins.get(other) {
                Some(plugin) => plugin.execute(args).await,
                None => {
                    tracing::warn!("Unknown command: {}", other);
                    OpResult::error(messages::unknown_command(other))
                }
            },
        }
    }

    /// Send a prompt that is already JSON, as the interactive shell does.
    pub async fn ask(&self, prompt: &Value) -> OpResult {
        commands::ai::ask(&self.config, self.relay.as_ref(), &self.applier, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::plugins::fake_relay::FakeRelay;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn dispatcher(dir: &TempDir, relay: Arc<FakeRelay>) -> Dispatcher {
        let config = AppConfig::default().with_root(dir.path().join("work"));
        fs::create_dir_all(&config.workspace.root).unwrap();
        Dispatcher::new(
            config,
            relay,
            SettingsStore::new(dir.path().join("settings.yaml")),
        )
    }

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let dir = TempDir::new().unwrap();
        let dispatcher = dispatcher(&dir, Arc::new(FakeRelay::replying(json!({}))));

        let result = dispatcher.route(&argv(&["frobnicate"])).await;
        assert!(!result.is_ok());
        assert_eq!(result.message, "unknown command: frobnicate");
    }

    #[tokio::test]
    async fn test_filesystem_commands_use_root() {
        let dir = TempDir::new().unwrap();
        let dispatcher = dispatcher(&dir, Arc::new(FakeRelay::replying(json!({}))));

        let created = dispatcher.route(&argv(&["mkfile", "src/a.js", "let", "x"])).await;
        assert_eq!(created.message, "File created: src/a.js");

        let listed = dispatcher.route(&argv(&["ls", "src"])).await;
        assert_eq!(listed.get("list").unwrap(), &json!(["a.js"]));

        let found = dispatcher.route(&argv(&["search", "LET"])).await;
        assert_eq!(found.get("matches").unwrap(), &json!(["src/a.js"]));

        let project = dispatcher.route(&argv(&["project"])).await;
        assert_eq!(project.get("count").unwrap(), 1);

        let removed = dispatcher.route(&argv(&["rm", "src"])).await;
        assert_eq!(removed.message, "Deleted: src");
        assert!(!dir.path().join("work/src").exists());
    }

    #[tokio::test]
    async fn test_plugin_dispatch() {
        let dir = TempDir::new().unwrap();
        let dispatcher = dispatcher(&dir, Arc::new(FakeRelay::replying(json!({}))));

        let result = dispatcher.route(&argv(&["deps"])).await;
        assert_eq!(result.message, "No package.json found - not a Node.js project");

        let result = dispatcher.route(&argv(&["secrets"])).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_help_lists_plugins() {
        let dir = TempDir::new().unwrap();
        let dispatcher = dispatcher(&dir, Arc::new(FakeRelay::replying(json!({}))));

        for result in [
            dispatcher.route(&argv(&["help"])).await,
            dispatcher.route(&[]).await,
        ] {
            let plugins = result.get("plugins").unwrap().as_array().unwrap();
            assert_eq!(plugins.len(), 5);
            assert!(result.get("templates").unwrap().as_array().unwrap().len() >= 6);
        }
    }

    #[tokio::test]
    async fn test_ai_uses_agent_when_configured() {
        let dir = TempDir::new().unwrap();
        let relay = Arc::new(FakeRelay::replying(json!({"ok": true})));
        let mut config = AppConfig::default().with_root(dir.path());
        config.api.agent_id = Some("ag:123".into());
        let dispatcher = Dispatcher::new(
            config,
            relay.clone(),
            SettingsStore::new(dir.path().join("settings.yaml")),
        );

        let result = dispatcher.route(&argv(&["ai", r#"{"task":"hi"}"#])).await;

        assert!(result.is_ok());
        assert_eq!(result.get("reply").unwrap(), &json!({"ok": true}));
        assert_eq!(relay.prompt_count(), 1);
        assert_eq!(*relay.agent_ids.lock().unwrap(), vec!["ag:123".to_string()]);
    }

    #[tokio::test]
    async fn test_apply_and_config_routes() {
        let dir = TempDir::new().unwrap();
        let dispatcher = dispatcher(&dir, Arc::new(FakeRelay::replying(json!({}))));
        fs::write(
            dir.path().join("work/actions.json"),
            r#"[{"type": "create_file", "path": "out/a.txt", "content": "hi"}]"#,
        )
        .unwrap();

        let result = dispatcher.route(&argv(&["apply", "actions.json"])).await;
        assert_eq!(result.message, "processed 1 actions");
        assert_eq!(
            fs::read_to_string(dir.path().join("work/out/a.txt")).unwrap(),
            "hi"
        );

        let result = dispatcher.route(&argv(&["config", "set", "model", "m"])).await;
        assert!(result.is_ok());
        assert!(dir.path().join("settings.yaml").exists());
    }
}
