//! Secret scanning: sensitive file names and secret-looking content.

use super::target_dir;
use crate::domain::result::OpResult;
use crate::domain::traits::CommandHandler;
use crate::infrastructure::tools::fs::FsAdapter;
use crate::strings::messages;
use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

const SENSITIVE_FILES: &[&str] = &[
    ".env",
    "config.json",
    "credentials",
    "secrets.yml",
    "aws.yml",
    "config.yml",
];

/// `(name, pattern)` checked in order; the first hit is reported.
const SECRET_PATTERNS: &[(&str, &str)] = &[
    ("AWS Access Key", r"AKIA[0-9A-Z]{16}"),
    (
        "AWS Secret Key",
        r#"(?i)aws(.{0,20})?(secret|private)?.{0,20}['"][0-9a-zA-Z/+]{40}['"]"#,
    ),
    ("Password", r#"(?i)(password|passwd|pwd)\s*[:=]\s*['"]?[^\s'"]{4,}"#),
    (
        "API Key or Token",
        r#"(?i)(api[_-]?key|secret[_-]?key|access[_-]?token|auth[_-]?token)\s*[:=]\s*['"]?[A-Za-z0-9_\-]{16,}"#,
    ),
    (
        "Private Key",
        r"-----BEGIN\s+(?:RSA\s+|EC\s+|OPENSSH\s+)?PRIVATE\s+KEY-----",
    ),
    (
        "Bearer JWT",
        r"(?i)bearer\s+eyJ[A-Za-z0-9_-]*\.eyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]*",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub file: String,
    pub kind: String,
    pub severity: Severity,
}

fn compiled() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        SECRET_PATTERNS
            .iter()
            .map(|(name, pattern)| (*name, Regex::new(pattern).expect("valid secret regex")))
            .collect()
    })
}

/// Name of the first secret pattern matching `content`.
pub fn detect(content: &str) -> Option<&'static str> {
    compiled()
        .iter()
        .find(|(_, re)| re.is_match(content))
        .map(|(name, _)| *name)
}

pub struct SecretsPlugin {
    fs: FsAdapter,
}

impl SecretsPlugin {
    pub fn new(fs: FsAdapter) -> Self {
        Self { fs }
    }

    async fn scan(&self, dir: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for file in self.fs.walk(dir) {
            let is_sensitive = Path::new(&file)
                .file_name()
                .is_some_and(|n| SENSITIVE_FILES.iter().any(|s| n == *s));
            if is_sensitive {
                findings.push(Finding {
                    file: file.clone(),
                    kind: "Sensitive file".to_string(),
                    severity: Severity::Medium,
                });
            }

            // Binary files fail UTF-8 decoding and are skipped.
            if let Ok(content) = tokio::fs::read_to_string(self.fs.resolve(&file)).await
                && let Some(kind) = detect(&content)
            {
                findings.push(Finding {
                    file,
                    kind: kind.to_string(),
                    severity: Severity::High,
                });
            }
        }

        findings
    }
}

#[async_trait]
impl CommandHandler for SecretsPlugin {
    fn name(&self) -> &'static str {
        "secrets"
    }

    fn description(&self) -> &'static str {
        "Scan for sensitive files and hard-coded secrets"
    }

    async fn execute(&self, args: &[String]) -> OpResult {
        let findings = self.scan(target_dir(args)).await;
        if !findings.is_empty() {
            tracing::warn!("{} potential secrets found", findings.len());
        }
        OpResult::ok(messages::secrets_scanned(findings.len()))
            .with("count", findings.len())
            .with("findings", serde_json::to_value(&findings).unwrap_or_default())
    }
}
