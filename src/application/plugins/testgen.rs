//! Model-generated unit tests for JavaScript and TypeScript sources.

use super::{reply_field, target_dir};
use crate::domain::result::OpResult;
use crate::domain::traits::{CommandHandler, ModelRelay};
use crate::infrastructure::tools::fs::FsAdapter;
use crate::strings::{messages, prompts};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;

const SOURCE_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx"];
const EXCLUDED_MARKERS: &[&str] = &["node_modules", "test", "spec", "dist", "build"];
const MAX_FILES: usize = 3;

/// Source files worth generating tests for, in walk order.
pub fn candidates(files: &[String]) -> Vec<&String> {
    files
        .iter()
        .filter(|f| {
            Path::new(f)
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e.as_str()))
        })
        .filter(|f| !EXCLUDED_MARKERS.iter().any(|m| f.contains(m)))
        .take(MAX_FILES)
        .collect()
}

/// `src/app.ts` becomes `src/app.test.ts`.
pub fn test_path(source: &str) -> String {
    let path = Path::new(source);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => path
            .with_file_name(format!(
                "{}.test.{}",
                stem.to_string_lossy(),
                ext.to_string_lossy()
            ))
            .to_string_lossy()
            .to_string(),
        _ => format!("{source}.test"),
    }
}

pub struct TestGenPlugin {
    fs: FsAdapter,
    relay: Arc<dyn ModelRelay>,
}

impl TestGenPlugin {
    pub fn new(fs: FsAdapter, relay: Arc<dyn ModelRelay>) -> Self {
        Self { fs, relay }
    }

    async fn test_code(&self, file: &str, content: &str) -> Option<String> {
        let prompt = json!({
            "task": prompts::TESTGEN_TASK,
            "file": file,
            "content": content,
            "framework": prompts::TESTGEN_FRAMEWORK,
            "instructions": prompts::TESTGEN_INSTRUCTIONS,
        });

        match self.relay.ask_chat(&prompt).await {
            Ok(reply) => reply_field(&reply, &["testCode", "content"]),
            Err(e) => {
                tracing::warn!("Test generation for {} failed: {}", file, e);
                None
            }
        }
    }
}

#[async_trait]
impl CommandHandler for TestGenPlugin {
    fn name(&self) -> &'static str {
        "testgen"
    }

    fn description(&self) -> &'static str {
        "Ask the model for unit tests of up to three source files"
    }

    async fn execute(&self, args: &[String]) -> OpResult {
        let files = self.fs.walk(target_dir(args));
        let mut written = Vec::new();
        let mut results = Vec::new();

        for file in candidates(&files) {
            let content = match self.fs.read_text(file).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("Skipping {}: {:#}", file, e);
                    continue;
                }
            };

            let Some(code) = self.test_code(file, &content).await else {
                continue;
            };

            let path = test_path(file);
            let result = self.fs.create(&path, &code).await;
            if result.is_ok() {
                written.push(Value::String(path));
            }
            results.push(result.to_value());
        }

        OpResult::ok(messages::tests_generated(written.len()))
            .with("files", written)
            .with("results", results)
    }
}
