//! # Strings Module
//!
//! Centralizes user-facing strings, prompts, help text and scaffolding templates.

pub mod help;
pub mod messages;
pub mod prompts;
pub mod templates;
