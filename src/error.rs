//! Application error taxonomy.
//!
//! Remote-operation failures are deliberately *not* part of this type: the
//! dispatch pipeline folds them into [`crate::domain::entities::OperationOutcome`]
//! values instead of raising, so `AppError` only covers configuration,
//! persistence, and transport-level faults.

use serde_json::{Value, json};

/// Errors raised by the account store, the storage API client, and startup code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid or missing process configuration.
    #[error("configuration error: {message}")]
    Config { message: String, details: Value },

    /// The account store could not be read or written.
    #[error("account store error: {message}")]
    Store { message: String, details: Value },

    /// The storage API could not be reached or returned an undecodable response.
    #[error("storage api error: {message}")]
    Storage { message: String, details: Value },

    /// Caller-supplied input failed validation.
    #[error("validation error: {message}")]
    Validation { message: String, details: Value },
}

impl AppError {
    pub fn config(message: impl Into<String>, details: Value) -> Self {
        Self::Config {
            message: message.into(),
            details,
        }
    }

    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }

    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::store("I/O failure", json!({ "reason": e.to_string() }))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::store(
            "malformed account store file",
            json!({ "reason": e.to_string() }),
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        Self::storage("request failed", json!({ "reason": e.to_string() }))
    }
}
