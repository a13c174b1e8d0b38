//! # Command Handlers
//!
//! Contains specific handler functions for each built-in command (e.g. `ai`, `apply`, `ls`).
//! These handlers are invoked by the Dispatcher.

pub mod ai;
pub mod apply;
pub mod config;
pub mod fs;
pub mod help;
pub mod template;
