//! Project structure heuristics.

use super::{join, target_dir};
use crate::domain::result::{OpResult, settle};
use crate::domain::traits::CommandHandler;
use crate::infrastructure::tools::fs::FsAdapter;
use crate::strings::messages;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::path::Path;

const LARGE_FILE_BYTES: u64 = 1_000_000;
const SIZE_CHECK_LIMIT: usize = 50;

/// `(file, description)`; every file except `.env` is expected to exist.
const IMPORTANT_FILES: &[(&str, &str)] = &[
    ("README.md", "Documentation file"),
    (".gitignore", "Git ignore rules"),
    ("package.json", "Node.js project file"),
    ("Dockerfile", "Docker configuration"),
    (".env", "Environment variables"),
    ("docker-compose.yml", "Docker compose configuration"),
];

/// `(marker file, project kind)`
const PROJECT_MARKERS: &[(&str, &str)] = &[
    ("package.json", "Node"),
    ("Cargo.toml", "Rust"),
    ("requirements.txt", "Python"),
    ("pyproject.toml", "Python"),
    ("setup.py", "Python"),
    ("pubspec.yaml", "Flutter"),
    ("go.mod", "Go"),
];

pub struct AnalyzePlugin {
    fs: FsAdapter,
}

impl AnalyzePlugin {
    pub fn new(fs: FsAdapter) -> Self {
        Self { fs }
    }

    async fn analyze(&self, dir: &str) -> Result<OpResult> {
        let mut summary = Map::new();
        let mut issues: Vec<String> = Vec::new();
        let mut suggestions: Vec<String> = Vec::new();
        let mut dependencies = json!({});

        let package_path = join(dir, "package.json");
        if self.fs.exists(&package_path) {
            let text = self.fs.read_text(&package_path).await?;
            match serde_json::from_str::<Value>(&text) {
                Ok(package) => {
                    dependencies = json!({
                        "production": package.get("dependencies").cloned().unwrap_or(json!({})),
                        "development": package.get("devDependencies").cloned().unwrap_or(json!({})),
                        "scripts": package.get("scripts").cloned().unwrap_or(json!({})),
                    });
                    summary.insert("packageName".into(), package.get("name").cloned().unwrap_or(Value::Null));
                    summary.insert("version".into(), package.get("version").cloned().unwrap_or(Value::Null));
                }
                Err(e) => {
                    tracing::warn!("Unparseable {}: {}", package_path, e);
                    issues.push(messages::INVALID_PACKAGE_JSON.to_string());
                }
            }
        }

        let files = self.fs.walk(dir);
        summary.insert("totalFiles".into(), files.len().into());

        let mut file_types: BTreeMap<String, usize> = BTreeMap::new();
        for file in &files {
            let ext = Path::new(file)
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_else(|| "none".to_string());
            *file_types.entry(ext).or_default() += 1;
        }
        summary.insert("fileTypes".into(), json!(file_types));

        let project_types: Vec<&str> = PROJECT_MARKERS
            .iter()
            .filter(|(marker, _)| self.fs.exists(&join(dir, marker)))
            .map(|(_, kind)| *kind)
            .fold(Vec::new(), |mut kinds, kind| {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
                kinds
            });
        summary.insert("projectTypes".into(), json!(project_types));

        let mut important = Map::new();
        for (name, description) in IMPORTANT_FILES {
            let found = files
                .iter()
                .any(|f| Path::new(f).file_name().is_some_and(|n| n == *name));
            important.insert(
                name.to_string(),
                json!({"exists": found, "description": description}),
            );
            if !found && *name != ".env" {
                issues.push(format!("Missing {name} - {description}"));
                suggestions.push(format!("Create a {name} file"));
            }
        }

        let test_files = files
            .iter()
            .filter(|f| f.contains("test") || f.contains("spec") || f.contains("__tests__"))
            .count();
        summary.insert("testFiles".into(), test_files.into());
        if test_files == 0 {
            issues.push("No test files found".to_string());
            suggestions.push("Add test files to ensure code quality".to_string());
        }

        let mut large_files = Vec::new();
        for file in files.iter().take(SIZE_CHECK_LIMIT) {
            // Files that vanish or cannot be stat'ed are skipped.
            if let Ok(meta) = tokio::fs::metadata(self.fs.resolve(file)).await
                && meta.len() > LARGE_FILE_BYTES
            {
                large_files.push(json!({"file": file, "size": meta.len()}));
            }
        }

        let mut analysis = json!({
            "summary": summary,
            "files": important,
            "dependencies": dependencies,
            "issues": issues,
            "suggestions": suggestions,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        if !large_files.is_empty() {
            if let Some(issues) = analysis["issues"].as_array_mut() {
                issues.push("Found large files that might need optimization".into());
            }
            analysis["largeFiles"] = json!(large_files);
        }

        tracing::info!("Analyzed {} ({} files)", dir, files.len());
        Ok(OpResult::ok(messages::analysis_done(dir)).with("analysis", analysis))
    }
}

#[async_trait]
impl CommandHandler for AnalyzePlugin {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Report project structure, missing files and dependencies"
    }

    async fn execute(&self, args: &[String]) -> OpResult {
        settle(self.analyze(target_dir(args)).await)
    }
}
