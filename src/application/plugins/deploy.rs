//! Docker deployment scaffolding for Node.js projects.

use super::{join, reply_field, target_dir};
use crate::domain::result::{OpResult, settle};
use crate::domain::traits::{CommandHandler, ModelRelay};
use crate::infrastructure::tools::fs::FsAdapter;
use crate::strings::prompts::{self, PromptRenderer};
use crate::strings::{messages, templates};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

pub struct DeployPlugin {
    fs: FsAdapter,
    relay: Arc<dyn ModelRelay>,
}

impl DeployPlugin {
    pub fn new(fs: FsAdapter, relay: Arc<dyn ModelRelay>) -> Self {
        Self { fs, relay }
    }

    /// Ask the model for a Dockerfile, falling back to the built-in one.
    async fn dockerfile(&self, package: &Value) -> String {
        let prompt = json!({
            "task": prompts::DOCKERFILE_TASK,
            "packageJson": package,
            "instructions": prompts::DOCKERFILE_INSTRUCTIONS,
        });

        match self.relay.ask_chat(&prompt).await {
            Ok(reply) => reply_field(&reply, &["dockerfile", "content"]).unwrap_or_else(|| {
                tracing::info!("Model reply had no Dockerfile, using the built-in one");
                templates::NODE_DOCKERFILE.to_string()
            }),
            Err(e) => {
                tracing::warn!("Dockerfile generation failed: {}", e);
                templates::NODE_DOCKERFILE.to_string()
            }
        }
    }

    async fn deploy(&self, dir: &str) -> Result<OpResult> {
        let package_path = join(dir, "package.json");
        if !self.fs.exists(&package_path) {
            return Ok(OpResult::error(messages::NO_PACKAGE_JSON));
        }

        let text = self.fs.read_text(&package_path).await?;
        let package: Value = serde_json::from_str(&text)
            .with_context(|| messages::INVALID_PACKAGE_JSON.to_string())?;
        let app_name = package
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .unwrap_or("app")
            .to_string();

        let dockerfile_path = join(dir, "Dockerfile");
        if !self.fs.exists(&dockerfile_path) {
            let content = self.dockerfile(&package).await;
            self.fs.write_text(&dockerfile_path, &content).await?;
            tracing::info!("Created {}", dockerfile_path);
        }

        let compose_path = join(dir, "docker-compose.yml");
        if !self.fs.exists(&compose_path) {
            let content = PromptRenderer::new(templates::DOCKER_COMPOSE)
                .set("{{APP_NAME}}", app_name.as_str())
                .render();
            self.fs.write_text(&compose_path, &content).await?;
            tracing::info!("Created {}", compose_path);
        }

        let files: Vec<String> = [dockerfile_path, compose_path]
            .into_iter()
            .filter(|f| self.fs.exists(f))
            .collect();

        Ok(OpResult::ok(messages::DEPLOY_READY)
            .with("files", files)
            .with("instructions", instructions(&app_name)))
    }
}

fn instructions(app_name: &str) -> Value {
    json!({
        "docker": [
            format!("docker build -t {app_name} ."),
            format!("docker run -p 3000:3000 {app_name}"),
        ],
        "dockerCompose": [
            "docker-compose up -d",
            "docker-compose logs -f",
        ],
        "cloud": [
            "Push to GitHub and connect to your favorite cloud provider",
            "Examples: Vercel, Netlify, AWS, Google Cloud, Azure",
        ],
    })
}

#[async_trait]
impl CommandHandler for DeployPlugin {
    fn name(&self) -> &'static str {
        "deploy"
    }

    fn description(&self) -> &'static str {
        "Generate Dockerfile and docker-compose.yml for a Node.js project"
    }

    async fn execute(&self, args: &[String]) -> OpResult {
        settle(self.deploy(target_dir(args)).await)
    }
}
