//! # Action Applier
//!
//! Performs validated actions against the workspace root. Each action is
//! independent: a batch is a sequential loop with no rollback, and a failure
//! in one item never stops the next.

use crate::application::validator;
use crate::domain::config::ActionsConfig;
use crate::domain::result::{OpResult, settle};
use crate::domain::types::{Action, ActionKind, PatchFormat};
use crate::infrastructure::tools::fs::FsAdapter;
use crate::infrastructure::tools::shell::ProcessRunner;
use crate::strings::messages;
use anyhow::{Context as AnyhowContext, Result};
use std::path::{Path, PathBuf};

pub struct ActionApplier {
    fs: FsAdapter,
    runner: ProcessRunner,
    patch_program: String,
    patch_file: PathBuf,
}

/// Removes the temporary diff when the patch step ends, whatever the outcome.
struct TempPatch(PathBuf);

impl Drop for TempPatch {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.0)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!("Failed to remove {}: {}", self.0.display(), e);
        }
    }
}

impl ActionApplier {
    pub fn new(fs: FsAdapter, config: &ActionsConfig) -> Self {
        Self {
            fs,
            runner: ProcessRunner::new(config.command_timeout_secs),
            patch_program: config.patch_program.clone(),
            patch_file: config.patch_file.clone(),
        }
    }

    /// Validate, then apply a single wire action.
    pub async fn apply_action(&self, action: &Action) -> OpResult {
        match validator::validate(action) {
            Ok(kind) => self.apply(&kind).await,
            Err(e) => {
                tracing::warn!("Rejected {} action: {}", action.action_type, e);
                OpResult::error(e)
            }
        }
    }

    /// Validate and apply each action in order, one result per input.
    pub async fn apply_all(&self, actions: &[Action]) -> Vec<OpResult> {
        let mut results = Vec::with_capacity(actions.len());
        for action in actions {
            results.push(self.apply_action(action).await);
        }
        results
    }

    /// Perform an already validated action.
    pub async fn apply(&self, kind: &ActionKind) -> OpResult {
        tracing::debug!("Applying {}", kind.action_type().as_str());
        settle(self.try_apply(kind).await)
    }

    async fn try_apply(&self, kind: &ActionKind) -> Result<OpResult> {
        match kind {
            ActionKind::CreateFile { path, content } => {
                self.fs.write_text(path, content).await?;
                tracing::info!("Created {}", path);
                Ok(OpResult::ok(messages::action_created(path)))
            }
            ActionKind::PatchFile {
                path,
                content,
                format: PatchFormat::Unified,
            } => self.apply_unified_patch(path, content).await,
            ActionKind::PatchFile {
                path,
                content,
                format: PatchFormat::Replace,
            } => {
                self.fs.write_text(path, content).await?;
                tracing::info!("Replaced {}", path);
                Ok(OpResult::ok(messages::action_replaced(path)))
            }
            ActionKind::DeleteFile { path } => self.delete_file(path).await,
            ActionKind::RunCommand { command, cwd } => {
                let dir = cwd
                    .as_deref()
                    .map(|c| self.fs.resolve(c))
                    .unwrap_or_else(|| self.fs.root().to_path_buf());
                self.run_command(command, &dir).await
            }
        }
    }

    async fn apply_unified_patch(&self, path: &str, diff: &str) -> Result<OpResult> {
        let tmp = self.fs.resolve(&self.patch_file.to_string_lossy());
        tokio::fs::write(&tmp, diff)
            .await
            .with_context(|| format!("Failed to write patch file {}", tmp.display()))?;
        let _cleanup = TempPatch(tmp.clone());

        let tmp_arg = tmp.to_string_lossy();
        let out = self
            .runner
            .run_program(
                &self.patch_program,
                &["-p0", "-i", &*tmp_arg, path],
                self.fs.root(),
            )
            .await
            .with_context(|| messages::patch_failed(path))?;

        if !out.success {
            tracing::warn!("Patch for {} exited with {:?}", path, out.code);
            return Ok(OpResult::error(messages::patch_failed(path)).with("output", out.output));
        }

        tracing::info!("Patched {}", path);
        Ok(OpResult::ok(messages::action_patched(path)).with("output", out.output))
    }

    async fn delete_file(&self, path: &str) -> Result<OpResult> {
        let target = self.fs.resolve(path);
        let meta = match tokio::fs::metadata(&target).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(OpResult::ok(messages::action_file_not_found(path)));
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to stat {path}")),
        };

        if meta.is_dir() {
            anyhow::bail!("Failed to delete {path}: is a directory");
        }

        tokio::fs::remove_file(&target)
            .await
            .with_context(|| format!("Failed to delete {path}"))?;
        tracing::info!("Deleted {}", path);
        Ok(OpResult::ok(messages::action_deleted(path)))
    }

    async fn run_command(&self, command: &str, cwd: &Path) -> Result<OpResult> {
        tracing::info!("Running `{}` in {}", command, cwd.display());
        let out = self.runner.run_shell(command, cwd).await?;

        if !out.success {
            return Ok(OpResult::error(messages::command_failed(command))
                .with("code", out.code)
                .with("output", out.output));
        }
        Ok(OpResult::ok(messages::command_ran(command)).with("output", out.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn applier(dir: &TempDir) -> ActionApplier {
        let config = ActionsConfig {
            patch_file: dir.path().join("gendev_patch.diff"),
            ..Default::default()
        };
        ActionApplier::new(FsAdapter::new(dir.path(), Vec::new()), &config)
    }

    fn create(path: &str, content: &str) -> Action {
        Action {
            action_type: "create_file".into(),
            path: Some(path.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_file_makes_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let result = applier(&dir).apply_action(&create("out/a.txt", "hi")).await;

        assert!(result.is_ok());
        assert_eq!(result.message, "created out/a.txt");
        assert!(dir.path().join("out").is_dir());
        assert_eq!(fs::read_to_string(dir.path().join("out/a.txt")).unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_create_file_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let applier = applier(&dir);
        let action = create("a.txt", "same");

        let first = applier.apply_action(&action).await;
        let second = applier.apply_action(&action).await;

        assert!(first.is_ok() && second.is_ok());
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "same");
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let action = Action {
            action_type: "delete_file".into(),
            path: Some("missing.txt".into()),
            ..Default::default()
        };

        let result = applier(&dir).apply_action(&action).await;
        assert!(result.is_ok());
        assert_eq!(result.message, "file not found: missing.txt");
    }

    #[tokio::test]
    async fn test_delete_file_and_refuse_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("keep")).unwrap();
        let applier = applier(&dir);

        let result = applier
            .apply(&ActionKind::DeleteFile { path: "old.txt".into() })
            .await;
        assert_eq!(result.message, "deleted old.txt");
        assert!(!dir.path().join("old.txt").exists());

        let result = applier
            .apply(&ActionKind::DeleteFile { path: "keep".into() })
            .await;
        assert!(!result.is_ok());
        assert!(dir.path().join("keep").is_dir());
    }

    #[tokio::test]
    async fn test_replace_patch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "old").unwrap();

        let result = applier(&dir)
            .apply(&ActionKind::PatchFile {
                path: "a.txt".into(),
                content: "new".into(),
                format: PatchFormat::Replace,
            })
            .await;

        assert_eq!(result.message, "replaced a.txt");
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_batch_continues_after_invalid_item() {
        let dir = TempDir::new().unwrap();
        let actions = vec![
            create("one.txt", "1"),
            Action {
                action_type: "create_file".into(),
                ..Default::default()
            },
            create("three.txt", "3"),
        ];

        let results = applier(&dir).apply_all(&actions).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(!results[1].is_ok());
        assert_eq!(results[1].message, "Missing required field: path");
        assert!(results[2].is_ok());
        assert!(dir.path().join("three.txt").exists());
    }

    #[tokio::test]
    async fn test_rejected_action_has_no_effect() {
        let dir = TempDir::new().unwrap();
        let result = applier(&dir).apply_action(&create("../escape.txt", "x")).await;

        assert_eq!(result.message, "Path traversal not allowed: ../escape.txt");
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command_captures_output() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let result = applier(&dir)
            .apply(&ActionKind::RunCommand {
                command: "pwd".into(),
                cwd: Some("sub".into()),
            })
            .await;

        assert!(result.is_ok());
        let output = result.get("output").and_then(|v| v.as_str()).unwrap();
        assert!(output.trim_end().ends_with("sub"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command_failure_attaches_output() {
        let dir = TempDir::new().unwrap();
        let result = applier(&dir)
            .apply(&ActionKind::RunCommand {
                command: "echo broken 1>&2; exit 3".into(),
                cwd: None,
            })
            .await;

        assert!(!result.is_ok());
        assert_eq!(result.message, "Command failed: echo broken 1>&2; exit 3");
        assert!(result.get("output").unwrap().as_str().unwrap().contains("broken"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command_timeout() {
        let dir = TempDir::new().unwrap();
        let config = ActionsConfig {
            command_timeout_secs: 1,
            ..Default::default()
        };
        let applier = ActionApplier::new(FsAdapter::new(dir.path(), Vec::new()), &config);

        let result = applier
            .apply(&ActionKind::RunCommand {
                command: "sleep 5".into(),
                cwd: None,
            })
            .await;

        assert!(!result.is_ok());
        assert!(result.message.contains("timed out"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_patch_file_removed_when_patch_fails() {
        let dir = TempDir::new().unwrap();
        let config = ActionsConfig {
            patch_program: "false".into(),
            patch_file: dir.path().join("gendev_patch.diff"),
            ..Default::default()
        };
        let applier = ActionApplier::new(FsAdapter::new(dir.path(), Vec::new()), &config);

        let result = applier
            .apply(&ActionKind::PatchFile {
                path: "a.txt".into(),
                content: "garbage".into(),
                format: PatchFormat::Unified,
            })
            .await;

        assert!(!result.is_ok());
        assert_eq!(result.message, "Patch failed for a.txt");
        assert!(!dir.path().join("gendev_patch.diff").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_patch_file_removed_when_patch_succeeds() {
        let dir = TempDir::new().unwrap();
        let config = ActionsConfig {
            patch_program: "true".into(),
            patch_file: dir.path().join("gendev_patch.diff"),
            ..Default::default()
        };
        let applier = ActionApplier::new(FsAdapter::new(dir.path(), Vec::new()), &config);

        let result = applier
            .apply(&ActionKind::PatchFile {
                path: "a.txt".into(),
                content: "--- a.txt\n+++ a.txt\n".into(),
                format: PatchFormat::Unified,
            })
            .await;

        assert_eq!(result.message, "applied patch to a.txt");
        assert!(!dir.path().join("gendev_patch.diff").exists());
    }
}
