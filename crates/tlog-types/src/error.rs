//! Error types for tlog-types

use thiserror::Error;

/// Errors that can occur while constructing or decoding tlog values
#[derive(Error, Debug)]
pub enum Error {
    /// Base64 decoding error
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Hex or base64 content that does not decode
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Invalid checkpoint format
    #[error("Invalid checkpoint format: {0}")]
    InvalidCheckpoint(String),

    /// Invalid hash algorithm
    #[error("Invalid hash algorithm: {0}")]
    InvalidHashAlgorithm(String),
}

/// Result type for tlog-types operations
pub type Result<T> = std::result::Result<T, Error>;
