//! Error types for tlog-merkle
//!
//! Every rejection of attacker-supplied input is one of these variants. They
//! double as the failure reason carried by a
//! [`VerificationResult`](crate::VerificationResult).

use thiserror::Error;
use tlog_types::Digest;

/// Reasons a proof fails to verify
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Digest length or size fields are inconsistent; nothing was computed
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The proof path length differs from the one implied by the tree sizes
    #[error("Path length mismatch: expected {expected} hashes, got {actual}")]
    PathLengthMismatch { expected: usize, actual: usize },

    /// The reconstructed root disagrees with the claimed one
    #[error("Root mismatch for tree size {tree_size}: expected {expected}, calculated {calculated}")]
    RootMismatch {
        tree_size: u64,
        expected: Digest,
        calculated: Digest,
    },
}

/// Result type for Merkle tree operations
pub type Result<T> = std::result::Result<T, Error>;
