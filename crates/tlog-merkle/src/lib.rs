//! RFC 6962 Merkle tree verification for transparency logs
//!
//! This crate implements Merkle tree hashing and the verification of
//! inclusion proofs and consistency proofs handed out by an untrusted log.
//! Nothing here performs I/O; every function is pure and reentrant.

pub mod error;
pub mod proof;
pub mod tree;
pub mod verify;

pub use error::{Error, Result};
pub use proof::{root_from_inclusion_proof, verify_consistency_proof, verify_inclusion_proof};
pub use tree::{
    hash_children, hash_leaf, LogHasher, DEFAULT_HASHER, LEAF_HASH_PREFIX, NODE_HASH_PREFIX,
};
pub use verify::{Verdict, VerificationRequest, VerificationResult, Verifier};
