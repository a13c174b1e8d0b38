//! # Application Layer
//!
//! Contains the core logic and orchestration of the CLI.
//! This includes action validation and application, command routing, plugins and templates.

pub mod applier;
pub mod parsing;
pub mod plugins;
pub mod router;
pub mod templates;
pub mod validator;
