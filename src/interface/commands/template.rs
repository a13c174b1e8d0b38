//! # Template Command
//!
//! Handles `template <type> <framework> <name> [output_dir]`.

use crate::application::templates;
use crate::domain::result::OpResult;
use crate::infrastructure::tools::fs::FsAdapter;
use crate::strings::messages;

pub async fn handle_template(fs: &FsAdapter, args: &[String]) -> OpResult {
    let [kind, framework, name, rest @ ..] = args else {
        return OpResult::error(messages::TEMPLATE_USAGE);
    };
    let out_dir = rest.first().map(String::as_str).unwrap_or(".");
    templates::generate(fs, kind, framework, name, out_dir).await
}
