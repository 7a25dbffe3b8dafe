//! Core value types for transparency log verification
//!
//! This crate provides the immutable data structures handed from a log client
//! to the proof verifiers: digests, checkpoints (signed tree heads) and
//! inclusion/consistency proofs.

pub mod checkpoint;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod proof;

pub use checkpoint::Checkpoint;
pub use encoding::Digest;
pub use error::{Error, Result};
pub use hash::HashAlgorithm;
pub use proof::{ConsistencyProof, InclusionProof};
