//! Error types for the dyndns system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for dyndns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dyndns system
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Hostname that cannot be split into root and sub domain
    #[error("Invalid hostname: {0}")]
    InvalidHostname(String),

    /// The root domain is unusable at the provider: wrong name, or not
    /// enabled for API access. Distinct from [`Error::Api`] because it is a
    /// precondition failure of the whole zone, not a per-record issue.
    #[error("Zone {domain} is not retrievable: {message}")]
    ZoneNotRetrievable {
        /// Root domain the retrieve call was issued for
        domain: String,
        /// Provider-supplied error text, verbatim
        message: String,
    },

    /// The provider rejected a retrieve or edit call
    ///
    /// Raised for a non-success status inside an otherwise-200 response, a
    /// non-2xx HTTP status, or an unparseable response body. Carries the
    /// provider's raw error payload for operator diagnosis.
    #[error("DNS API error ({code}): {message}")]
    Api {
        /// Provider error code when the envelope carries one, otherwise the
        /// HTTP status of the response
        code: u16,
        /// Provider error message or raw response body, verbatim
        message: String,
    },

    /// Transport-level HTTP failures (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid-hostname error
    pub fn invalid_hostname(msg: impl Into<String>) -> Self {
        Self::InvalidHostname(msg.into())
    }

    /// Create a zone-not-retrievable error
    pub fn zone_not_retrievable(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ZoneNotRetrievable {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a DNS API error
    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }
}
