//! # Filesystem Adapter
//!
//! Read/list/create/delete/walk operations that normalise every outcome into
//! an [`OpResult`]. Relative paths resolve against the adapter's root.

use crate::domain::result::{OpResult, settle};
use crate::strings::messages;
use anyhow::{Context as AnyhowContext, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct FsAdapter {
    root: PathBuf,
    ignore: Vec<String>,
}

impl FsAdapter {
    pub fn new(root: impl Into<PathBuf>, ignore: Vec<String>) -> Self {
        Self {
            root: root.into(),
            ignore,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute paths are kept, relative ones are joined onto the root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    /// Root-relative display form of a resolved path.
    pub fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }

    pub async fn read_text(&self, path: &str) -> Result<String> {
        tokio::fs::read_to_string(self.resolve(path))
            .await
            .with_context(|| format!("Failed to read {path}"))
    }

    /// Write text, creating missing parent directories first.
    pub async fn write_text(&self, path: &str, content: &str) -> Result<()> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create parent directory for {path}"))?;
        }
        tokio::fs::write(&target, content)
            .await
            .with_context(|| format!("Failed to write {path}"))
    }

    pub async fn read(&self, path: &str) -> OpResult {
        settle(self.try_read(path).await)
    }

    async fn try_read(&self, path: &str) -> Result<OpResult> {
        let content = self.read_text(path).await?;
        Ok(OpResult::ok(messages::file_read(path))
            .with("path", path)
            .with("content", content))
    }

    pub async fn list(&self, dir: &str) -> OpResult {
        settle(self.try_list(dir).await)
    }

    async fn try_list(&self, dir: &str) -> Result<OpResult> {
        let mut entries = tokio::fs::read_dir(self.resolve(dir))
            .await
            .with_context(|| format!("Failed to read dir {dir}"))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        names.sort();

        Ok(OpResult::ok(messages::dir_listed(dir, names.len()))
            .with("path", dir)
            .with("list", names))
    }

    pub async fn create(&self, path: &str, content: &str) -> OpResult {
        match self.write_text(path, content).await {
            Ok(()) => OpResult::ok(messages::file_created(path)),
            Err(e) => OpResult::from_error(&e),
        }
    }

    pub async fn create_dir(&self, path: &str) -> OpResult {
        let target = self.resolve(path);
        if target.exists() {
            return OpResult::ok(messages::folder_exists(path));
        }
        match tokio::fs::create_dir_all(&target).await {
            Ok(()) => OpResult::ok(messages::folder_created(path)),
            Err(e) => OpResult::error(format!("Failed to create folder {path}: {e}")),
        }
    }

    /// Delete a file, or a directory with everything below it.
    pub async fn remove(&self, path: &str) -> OpResult {
        settle(self.try_remove(path).await)
    }

    async fn try_remove(&self, path: &str) -> Result<OpResult> {
        let target = self.resolve(path);
        let meta = tokio::fs::metadata(&target)
            .await
            .with_context(|| format!("Failed to stat {path}"))?;

        let removed = if meta.is_dir() {
            tokio::fs::remove_dir_all(&target).await
        } else {
            tokio::fs::remove_file(&target).await
        };
        removed.with_context(|| format!("Failed to delete {path}"))?;

        tracing::info!("Deleted {}", path);
        Ok(OpResult::ok(messages::path_deleted(path)))
    }

    /// Recursive depth-first file listing using the configured ignore set.
    pub fn walk(&self, dir: &str) -> Vec<String> {
        self.walk_with(dir, &self.ignore)
    }

    /// Recursive depth-first file listing.
    ///
    /// Entries named in `ignore` are skipped with everything below them.
    /// Unreadable subtrees are skipped silently.
    pub fn walk_with(&self, dir: &str, ignore: &[String]) -> Vec<String> {
        WalkDir::new(self.resolve(dir))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !ignore
                        .iter()
                        .any(|name| entry.file_name().to_string_lossy() == name.as_str())
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| self.display(entry.path()))
            .collect()
    }

    /// Files under the root whose text contains `term`, ignoring case.
    pub async fn search(&self, term: &str) -> OpResult {
        let needle = term.to_lowercase();
        let mut matches = Vec::new();

        for file in self.walk(".") {
            // Binary or unreadable files simply do not match.
            if let Ok(content) = tokio::fs::read_to_string(self.resolve(&file)).await
                && content.to_lowercase().contains(&needle)
            {
                matches.push(Value::String(file));
            }
        }

        OpResult::ok(messages::search_done(term, matches.len())).with("matches", matches)
    }
}
