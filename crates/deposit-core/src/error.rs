//! # Deposit Error Types
//!
//! Typed error handling for the deposit flow.
//! Every failure on the request path is a `DepositError`; cache failures are
//! a separate `CacheError` that never reaches the client.

use serde_json::Value;
use thiserror::Error;

/// Error code attached to wallet failures in client responses
pub const LNBITS_ERROR_CODE: &str = "LNBITS_ERROR";

/// Core error type for the deposit request path
#[derive(Debug, Error)]
pub enum DepositError {
    /// HTTP method other than POST/OPTIONS
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Request body is not valid JSON
    #[error("Invalid JSON body")]
    InvalidJson,

    /// Request body failed validation
    #[error("{0}")]
    InvalidRequest(String),

    /// Missing wallet configuration (message names the setting, never its value)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Wallet service refused or failed the invoice call
    #[error("Wallet error (status {status:?}): {detail}")]
    Upstream {
        /// HTTP status returned by the wallet, if a response was received
        status: Option<u16>,
        /// Detail extracted from the wallet's error body
        detail: Value,
    },

    /// Anything else (undecodable wallet response, panics, ...)
    #[error("{0}")]
    Internal(String),
}

impl DepositError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            DepositError::MethodNotAllowed => 405,
            DepositError::InvalidJson => 400,
            DepositError::InvalidRequest(_) => 400,
            DepositError::Configuration(_) => 500,
            DepositError::Upstream { .. } => 502,
            DepositError::Internal(_) => 500,
        }
    }

    /// Client-facing `error` string.
    ///
    /// Configuration and internal details stay server-side; the client gets a
    /// fixed message.
    pub fn public_message(&self) -> String {
        match self {
            DepositError::MethodNotAllowed | DepositError::InvalidJson => self.to_string(),
            DepositError::InvalidRequest(message) => message.clone(),
            DepositError::Configuration(_) => "Server configuration error".to_string(),
            DepositError::Upstream { .. } => "Failed to create Lightning invoice".to_string(),
            DepositError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Shorthand for a validation failure
    pub fn invalid(message: impl Into<String>) -> Self {
        DepositError::InvalidRequest(message.into())
    }
}

/// Result type alias for deposit operations
pub type DepositResult<T> = Result<T, DepositError>;

/// Failure writing an invoice record to the cache.
///
/// Only ever logged.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Transport failure talking to the cache
    #[error("Cache network error: {0}")]
    Network(String),

    /// Cache answered with a non-success status
    #[error("Cache rejected write (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    /// Record could not be encoded
    #[error("Cache serialization error: {0}")]
    Serialization(String),
}
