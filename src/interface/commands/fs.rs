//! # Filesystem Commands
//!
//! Handles `read`, `ls`, `mkfile`, `mkdir`, `rm`, `project` and `search`.

use crate::domain::result::OpResult;
use crate::infrastructure::tools::fs::FsAdapter;
use crate::strings::messages;

fn first(args: &[String]) -> Option<&str> {
    args.first().map(String::as_str).filter(|a| !a.is_empty())
}

pub async fn handle_read(fs: &FsAdapter, args: &[String]) -> OpResult {
    let path = args.join(" ");
    if path.trim().is_empty() {
        return OpResult::error(messages::READ_USAGE);
    }
    fs.read(&path).await
}

pub async fn handle_ls(fs: &FsAdapter, args: &[String]) -> OpResult {
    fs.list(first(args).unwrap_or(".")).await
}

pub async fn handle_mkfile(fs: &FsAdapter, args: &[String]) -> OpResult {
    let Some(path) = first(args) else {
        return OpResult::error(messages::MKFILE_USAGE);
    };
    fs.create(path, &args[1..].join(" ")).await
}

pub async fn handle_mkdir(fs: &FsAdapter, args: &[String]) -> OpResult {
    match first(args) {
        Some(path) => fs.create_dir(path).await,
        None => OpResult::error(messages::MKDIR_USAGE),
    }
}

pub async fn handle_rm(fs: &FsAdapter, args: &[String]) -> OpResult {
    match first(args) {
        Some(path) => fs.remove(path).await,
        None => OpResult::error(messages::RM_USAGE),
    }
}

pub fn handle_project(fs: &FsAdapter, args: &[String]) -> OpResult {
    let files = fs.walk(first(args).unwrap_or("."));
    OpResult::ok(messages::project_walked(files.len()))
        .with("count", files.len())
        .with("files", files)
}

pub async fn handle_search(fs: &FsAdapter, args: &[String]) -> OpResult {
    let term = args.join(" ");
    if term.trim().is_empty() {
        return OpResult::error(messages::SEARCH_USAGE);
    }
    fs.search(&term).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_mkfile_joins_content() {
        let dir = TempDir::new().unwrap();
        let adapter = FsAdapter::new(dir.path(), Vec::new());

        let result = handle_mkfile(&adapter, &args(&["notes.txt", "hello", "world"])).await;

        assert!(result.is_ok());
        assert_eq!(
            fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
            "hello world"
        );
    }

    #[tokio::test]
    async fn test_missing_arguments_are_usage_errors() {
        let dir = TempDir::new().unwrap();
        let adapter = FsAdapter::new(dir.path(), Vec::new());

        assert_eq!(handle_read(&adapter, &[]).await.message, messages::READ_USAGE);
        assert_eq!(handle_mkfile(&adapter, &[]).await.message, messages::MKFILE_USAGE);
        assert_eq!(handle_mkdir(&adapter, &[]).await.message, messages::MKDIR_USAGE);
        assert_eq!(handle_rm(&adapter, &[]).await.message, messages::RM_USAGE);
        assert_eq!(handle_search(&adapter, &[]).await.message, messages::SEARCH_USAGE);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_project_counts_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::write(dir.path().join("src/main.js"), "").unwrap();
        fs::write(dir.path().join("node_modules/pkg/index.js"), "").unwrap();
        let adapter = FsAdapter::new(dir.path(), vec!["node_modules".into()]);

        let result = handle_project(&adapter, &[]);

        assert_eq!(result.get("count").unwrap(), 1);
        assert_eq!(result.get("files").unwrap()[0], "src/main.js");
    }
}
