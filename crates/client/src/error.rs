// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Error types for td-client operations.

use thiserror::Error;

/// All possible errors that can occur in td-client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never reached the server (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server failed (5xx).
    #[error("server error: status {status}")]
    Server { status: u16 },

    /// The server rejected the request (4xx other than 401/403/404).
    #[error("api error: status {status}: {message}")]
    Api { status: u16, message: String },

    /// Missing or expired credentials (401/403).
    #[error("unauthorized")]
    Unauthorized,

    /// The resource does not exist on the server (404).
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Core(#[from] td_core::Error),

    #[error(transparent)]
    Store(#[from] td_store::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether a failed remote read may be answered from the cache.
    ///
    /// Only failures that say nothing about the data qualify: the server
    /// being unreachable or broken. Auth failures and 404s surface as-is;
    /// serving cached rows for those would mask a real answer.
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Server { .. })
    }

    /// A short message suitable for a failed view state.
    pub fn user_message(&self) -> String {
        match self {
            Error::Network(_) => "No connection. Showing what we have.".to_string(),
            Error::Server { .. } => "The server had a problem. Try again shortly.".to_string(),
            Error::Unauthorized => "Your session expired. Sign in again.".to_string(),
            Error::NotFound(what) => format!("{what} no longer exists."),
            Error::Api { message, .. } => message.clone(),
            _ => "Something went wrong.".to_string(),
        }
    }
}

/// A specialized Result type for td-client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
