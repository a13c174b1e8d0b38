//! # Model Relay
//!
//! Forwards structured JSON prompts to the remote model API and parses the
//! reply back into JSON. Callers go through the `ModelRelay` trait; `Client`
//! is the HTTP implementation.

mod client;
pub mod providers;
pub mod types;

pub use client::Client;
