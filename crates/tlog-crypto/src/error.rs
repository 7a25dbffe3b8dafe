//! Error types for tlog-crypto

use thiserror::Error;

/// Errors that can occur in signature handling
#[derive(Error, Debug)]
pub enum Error {
    /// Signature did not verify
    #[error("Verification error: {0}")]
    Verification(String),

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Unsupported algorithm
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// PEM encoding/decoding error
    #[error("PEM error: {0}")]
    Pem(String),

    /// Certificate parsing error
    #[error("Certificate error: {0}")]
    InvalidCertificate(String),

    /// Signed note parsing/verification error
    #[error("Note error: {0}")]
    Note(String),

    /// Base64 error
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Checkpoint body error
    #[error(transparent)]
    Types(#[from] tlog_types::Error),
}

/// Result type for signature operations
pub type Result<T> = std::result::Result<T, Error>;
