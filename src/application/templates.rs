//! # Template Generator
//!
//! Scaffolds a single file from one of the built-in templates.

use crate::domain::result::OpResult;
use crate::infrastructure::tools::fs::FsAdapter;
use crate::strings::messages;
use crate::strings::prompts::PromptRenderer;
use crate::strings::templates;
use std::path::Path;

/// `(type, framework, template, extension)`
const TEMPLATES: &[(&str, &str, &str, &str)] = &[
    ("component", "react", templates::REACT_COMPONENT, "jsx"),
    ("component", "vue", templates::VUE_COMPONENT, "vue"),
    ("api", "express", templates::EXPRESS_API, "js"),
    ("api", "fastapi", templates::FASTAPI_API, "py"),
    ("test", "jest", templates::JEST_TEST, "test.js"),
    ("test", "mocha", templates::MOCHA_TEST, "spec.js"),
];

fn lookup(kind: &str, framework: &str) -> Option<(&'static str, &'static str)> {
    TEMPLATES
        .iter()
        .find(|(k, f, _, _)| *k == kind && *f == framework)
        .map(|(_, _, template, ext)| (*template, *ext))
}

/// Render a template for `name`, returning the content and file extension.
pub fn render(kind: &str, framework: &str, name: &str) -> Option<(String, &'static str)> {
    let (template, ext) = lookup(kind, framework)?;
    let content = PromptRenderer::new(template)
        .set("{{NAME_LOWER}}", name.to_lowercase())
        .set("{{NAME}}", name)
        .render();
    Some((content, ext))
}

/// Write `<out_dir>/<name>.<ext>` from the matching template.
pub async fn generate(
    fs: &FsAdapter,
    kind: &str,
    framework: &str,
    name: &str,
    out_dir: &str,
) -> OpResult {
    let Some((content, ext)) = render(kind, framework, name) else {
        return OpResult::error(messages::template_not_found(kind, framework));
    };

    let path = Path::new(out_dir)
        .join(format!("{name}.{ext}"))
        .to_string_lossy()
        .to_string();

    if let Err(e) = fs.write_text(&path, &content).await {
        return OpResult::from_error(&e);
    }

    tracing::info!("Generated {} from {}/{}", path, kind, framework);
    OpResult::ok(messages::template_created(&path))
        .with("path", path)
        .with("content", content)
}

/// `type/framework` pairs, for help output.
pub fn available() -> Vec<String> {
    TEMPLATES
        .iter()
        .map(|(kind, framework, _, _)| format!("{kind}/{framework}"))
        .collect()
}
