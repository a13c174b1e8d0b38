//! # Process Runner
//!
//! Runs shell commands and external programs with a bounded timeout,
//! capturing stdout and stderr into one text block.

use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Outcome of a finished child process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub output: String,
}

#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Execute a command line through the system shell in `cwd`.
    pub async fn run_shell(&self, command: &str, cwd: &Path) -> Result<CommandOutput> {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", command]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", command]);
            c
        };
        cmd.current_dir(cwd);
        self.run(cmd, command).await
    }

    /// Execute `program` with `args` directly, without a shell.
    pub async fn run_program(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<CommandOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(cwd);
        self.run(cmd, program).await
    }

    async fn run(&self, mut cmd: Command, label: &str) -> Result<CommandOutput> {
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        // Own process group, so a timeout can take down everything the child started.
        #[cfg(unix)]
        cmd.process_group(0);

        tracing::debug!("Spawning `{}`", label);
        let child = cmd
            .spawn()
            .with_context(|| format!("Failed to spawn `{label}`"))?;
        let pid = child.id();

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(waited) => waited.with_context(|| format!("Failed to wait for `{label}`"))?,
            Err(_) => {
                kill_group(pid);
                anyhow::bail!("`{}` timed out after {}s", label, self.timeout.as_secs());
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let mut combined = String::new();
        if !stdout.is_empty() {
            combined.push_str(&stdout);
        }
        if !stderr.is_empty() {
            if !combined.is_empty() {
                combined.push_str("\n--- STDERR ---\n");
            }
            combined.push_str(&stderr);
        }

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            output: combined,
        })
    }
}

#[cfg(unix)]
fn kill_group(pid: Option<u32>) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Some(pid) = pid.and_then(|p| i32::try_from(p).ok()) else {
        return;
    };
    if let Err(e) = killpg(Pid::from_raw(pid), Signal::SIGKILL) {
        tracing::debug!("killpg({}) failed: {}", pid, e);
    }
}

#[cfg(not(unix))]
fn kill_group(_pid: Option<u32>) {}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_captures_stdout_and_stderr() {
        let dir = TempDir::new().unwrap();
        let runner = ProcessRunner::new(10);

        let out = runner
            .run_shell("echo hello; echo oops 1>&2", dir.path())
            .await
            .unwrap();

        assert!(out.success);
        assert!(out.output.contains("hello"));
        assert!(out.output.contains("--- STDERR ---\noops"));
    }

    #[tokio::test]
    async fn test_reports_non_zero_exit() {
        let dir = TempDir::new().unwrap();
        let out = ProcessRunner::new(10)
            .run_shell("exit 3", dir.path())
            .await
            .unwrap();

        assert!(!out.success);
        assert_eq!(out.code, Some(3));
    }

    #[tokio::test]
    async fn test_runs_in_given_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

        let out = ProcessRunner::new(10)
            .run_shell("ls", dir.path())
            .await
            .unwrap();
        assert!(out.output.contains("marker.txt"));
    }

    #[tokio::test]
    async fn test_times_out() {
        let dir = TempDir::new().unwrap();
        let err = ProcessRunner::new(1)
            .run_shell("sleep 5", dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out after 1s"));
    }

    #[tokio::test]
    async fn test_timeout_kills_grandchildren() {
        let dir = TempDir::new().unwrap();
        let err = ProcessRunner::new(1)
            .run_shell("sh -c 'sleep 2; touch marker'", dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!dir.path().join("marker").exists());
    }
}
