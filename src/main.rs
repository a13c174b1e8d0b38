//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration, Actions and Results
//! - Infrastructure: Filesystem, Processes, Model API, Settings, Logging
//! - Application: Validator, Applier, Router, Plugins, Templates
//! - Interface: Command Handlers and the interactive shell
//!
//! With a command, prints its result as pretty JSON on stdout and exits.
//! Without one, starts the interactive shell.

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::router::Dispatcher;
use crate::domain::config::AppConfig;
use crate::domain::traits::ModelRelay;
use crate::infrastructure::llm::Client as LlmClient;
use crate::infrastructure::logging;
use crate::infrastructure::settings::SettingsStore;
use crate::interface::shell;

#[derive(Debug, Parser)]
#[command(
    name = "gendev",
    version,
    about = "Terminal assistant for local file operations and model-suggested code changes"
)]
struct Args {
    /// Settings file (default: <config dir>/gendev/settings.yaml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Apply actions from model replies without asking
    #[arg(long)]
    auto_apply: bool,

    /// Directory relative paths resolve against
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Log info-level events to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Command and its arguments, e.g. `ls src` or `ai '{"task": "..."}'`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn load_config(store: &SettingsStore) -> AppConfig {
    let settings = store.load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring settings in {}: {:#}", store.path().display(), e);
        BTreeMap::new()
    });
    AppConfig::load(&settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Logging Setup
    let _guard = logging::init(args.verbose)?;

    // 2. Load Configuration
    let store = match &args.config {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::default_location(),
    };
    let mut config = load_config(&store);
    if args.auto_apply {
        config = config.with_auto_apply(true);
    }
    if let Some(root) = args.root {
        config = config.with_root(root);
    }
    tracing::info!(
        "Starting gendev (root: {}, auto_apply: {})",
        config.workspace.root.display(),
        config.actions.auto_apply
    );

    // 3. Wire up the relay and dispatcher
    let relay: Arc<dyn ModelRelay> = Arc::new(LlmClient::new(config.api.clone()));
    let dispatcher = Dispatcher::new(config, relay, store);

    if args.command.is_empty() {
        return shell::run(&dispatcher).await;
    }

    let result = dispatcher.route(&args.command).await;
    let output = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
    println!("{output}");
    Ok(())
}
