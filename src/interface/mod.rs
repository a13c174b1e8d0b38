//! # Interface Layer
//!
//! Command handlers invoked by the dispatcher and the interactive shell.

pub mod commands;
pub mod shell;
