//! Error types for the JSON fetcher.
//!
//! # Design
//! `Status` carries the raw code and nothing else: a 404 and a 500 are both
//! just "the code". Failures that never produce a response get their own
//! variants (`Transport`, `Timeout`) instead of leaving the callback silent.

use std::time::Duration;

use thiserror::Error;

/// Outcome delivered to the callback when a fetch does not yield a value.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a status other than 200.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// Status 200, but the body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The URL could not be parsed into a request target.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The exchange failed before any response arrived.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// No response arrived within the configured limit.
    #[error("no response within {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    /// The HTTP status code, for `Status` errors only.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// A network-level failure reported by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failed: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Invalid fetcher configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}
