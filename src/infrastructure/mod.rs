//! # Infrastructure Layer
//!
//! Handles interactions with external systems: the local filesystem, child
//! processes, the model API, the settings file and log output.
//! Implements the traits defined in the Domain layer (e.g. `ModelRelay`).

pub mod llm;
pub mod logging;
pub mod settings;
pub mod tools;
