//! Dependency check against a small table of known-vulnerable releases.

use super::{join, target_dir};
use crate::domain::result::{OpResult, settle};
use crate::domain::traits::CommandHandler;
use crate::infrastructure::tools::fs::FsAdapter;
use crate::strings::messages;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Value, json};

/// `(package, first fixed version, advisory)`
const KNOWN_VULNERABLE: &[(&str, &str, &str)] = &[
    ("lodash", "4.17.12", "Prototype pollution"),
    ("express", "4.17.1", "Open redirect and query parser issues"),
    ("axios", "0.21.1", "Server-side request forgery"),
];

/// Numeric `major.minor.patch` from a declared range such as `^4.17.0`.
/// Missing components count as zero; anything non-numeric is `None`.
pub fn parse_version(declared: &str) -> Option<(u64, u64, u64)> {
    let trimmed = declared
        .trim()
        .trim_start_matches(|c: char| matches!(c, '^' | '~' | '=' | '>' | '<' | 'v' | ' '));
    let core = trimmed.split(['-', '+', ' ']).next()?;

    let mut parts = core.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    let patch = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    Some((major, minor, patch))
}

/// True when `declared` is below `fixed` or cannot be parsed.
pub fn is_vulnerable(declared: &str, fixed: &str) -> bool {
    match (parse_version(declared), parse_version(fixed)) {
        (Some(have), Some(need)) => have < need,
        _ => true,
    }
}

pub struct DepsPlugin {
    fs: FsAdapter,
}

impl DepsPlugin {
    pub fn new(fs: FsAdapter) -> Self {
        Self { fs }
    }

    async fn check(&self, dir: &str) -> Result<OpResult> {
        let package_path = join(dir, "package.json");
        if !self.fs.exists(&package_path) {
            return Ok(OpResult::error(messages::NO_PACKAGE_JSON));
        }

        let text = self.fs.read_text(&package_path).await?;
        let package: Value = serde_json::from_str(&text)
            .with_context(|| messages::INVALID_PACKAGE_JSON.to_string())?;

        let mut vulnerabilities = Vec::new();
        for section in ["dependencies", "devDependencies"] {
            let Some(deps) = package.get(section).and_then(Value::as_object) else {
                continue;
            };
            for (name, version) in deps {
                let declared = version.as_str().unwrap_or_default();
                if let Some((_, fixed, advisory)) =
                    KNOWN_VULNERABLE.iter().find(|(pkg, _, _)| *pkg == name.as_str())
                    && is_vulnerable(declared, fixed)
                {
                    vulnerabilities.push(json!({
                        "package": name,
                        "version": declared,
                        "fixedIn": fixed,
                        "advisory": advisory,
                        "section": section,
                    }));
                }
            }
        }

        tracing::info!("{} vulnerable dependencies in {}", vulnerabilities.len(), package_path);
        Ok(OpResult::ok(messages::deps_checked(vulnerabilities.len()))
            .with("count", vulnerabilities.len())
            .with("vulnerabilities", vulnerabilities))
    }
}

#[async_trait]
impl CommandHandler for DepsPlugin {
    fn name(&self) -> &'static str {
        "deps"
    }

    fn description(&self) -> &'static str {
        "Check package.json for known-vulnerable dependency versions"
    }

    async fn execute(&self, args: &[String]) -> OpResult {
        settle(self.check(target_dir(args)).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("^4.17.11"), Some((4, 17, 11)));
        assert_eq!(parse_version("~0.21"), Some((0, 21, 0)));
        assert_eq!(parse_version(">=1.0.0-beta.1"), Some((1, 0, 0)));
        assert_eq!(parse_version("latest"), None);
        assert_eq!(parse_version("git+https://x"), None);
    }

    #[test]
    fn test_is_vulnerable() {
        assert!(is_vulnerable("^4.17.11", "4.17.12"));
        assert!(!is_vulnerable("^4.17.12", "4.17.12"));
        assert!(!is_vulnerable("4.18.0", "4.17.12"));
        // Versions that cannot be compared are reported.
        assert!(is_vulnerable("*", "0.21.1"));
    }

    #[tokio::test]
    async fn test_reports_vulnerable_packages() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{
                "dependencies": {"lodash": "^4.17.4", "express": "^4.18.2", "react": "^18.0.0"},
                "devDependencies": {"axios": "0.19.0"}
            }"#,
        )
        .unwrap();

        let plugin = DepsPlugin::new(FsAdapter::new(dir.path(), Vec::new()));
        let result = plugin.execute(&[]).await;

        assert!(result.is_ok());
        assert_eq!(result.get("count").unwrap(), 2);
        let found = result.get("vulnerabilities").unwrap().as_array().unwrap();
        let names: Vec<_> = found.iter().map(|v| v["package"].as_str().unwrap()).collect();
        assert!(names.contains(&"lodash"));
        assert!(names.contains(&"axios"));
        assert!(!names.contains(&"express"));
    }

    #[tokio::test]
    async fn test_missing_package_json() {
        let dir = TempDir::new().unwrap();
        let plugin = DepsPlugin::new(FsAdapter::new(dir.path(), Vec::new()));

        let result = plugin.execute(&[]).await;
        assert!(!result.is_ok());
        assert_eq!(result.message, "No package.json found - not a Node.js project");
    }
}
