//! Error types for tlog-rekor

use thiserror::Error;

/// Errors that can occur in Rekor operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success response from the log
    #[error("API error: {0}")]
    Api(String),

    /// The requested entry does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A response that parsed but does not hold together
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 error
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Digest or checkpoint decoding error
    #[error(transparent)]
    Types(#[from] tlog_types::Error),
}

/// Result type for Rekor operations
pub type Result<T> = std::result::Result<T, Error>;
