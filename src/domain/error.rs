//! # Relay Errors
//!
//! Failures of a model round trip. Each one converts into an error
//! [`OpResult`] that keeps the upstream payload for diagnosis.

use crate::domain::result::OpResult;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("No API key configured - set MISTRAL_API_KEY or `config set api_key <key>`")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON from {source_label}")]
    InvalidJson { source_label: String, raw: String },

    #[error("Empty reply from {0}")]
    EmptyReply(String),
}

impl From<RelayError> for OpResult {
    fn from(err: RelayError) -> Self {
        let message = err.to_string();
        match err {
            RelayError::Status { status, body } => OpResult::error(message)
                .with("httpStatus", status)
                .with("raw", body),
            RelayError::InvalidJson { raw, .. } => OpResult::error(message).with("raw", raw),
            _ => OpResult::error(message),
        }
    }
}
