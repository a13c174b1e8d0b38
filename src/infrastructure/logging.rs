//! # Logging Setup
//!
//! Installs the global `tracing` subscriber: a session log file under the
//! platform data directory and a console layer on stderr. Stdout is kept
//! free for the JSON results.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE: &str = "session.log";
const FILE_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Directory holding `session.log`.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("gendev")
}

/// Console filter: `GENDEV_LOG`, then `RUST_LOG`, then `warn` (`info` when verbose).
fn console_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env("GENDEV_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }))
}

/// Appender for `session.log` in `dir`, or `None` when it cannot be opened.
fn file_writer(dir: &Path) -> Option<RollingFileAppender> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("gendev: file logging disabled ({}): {}", dir.display(), e);
        return None;
    }
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
        .map_err(|e| eprintln!("gendev: file logging disabled ({}): {}", dir.display(), e))
        .ok()
}

/// Install the subscriber. Keep the returned guard alive until exit so the
/// file writer flushes.
pub fn init(verbose: bool) -> Result<Option<WorkerGuard>> {
    let dir = log_dir();

    // File layer is best effort; a read-only home should not stop the CLI.
    let (file_layer, guard) = match file_writer(&dir) {
        Some(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(EnvFilter::new(FILE_FILTER));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter(verbose));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;

    tracing::info!("Logging to {}", dir.join(LOG_FILE).display());
    Ok(guard)
}
