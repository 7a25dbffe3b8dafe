//! Signature verification for transparency log checkpoints and artifacts
//!
//! This crate provides the trust side of log verification: parsing signed
//! checkpoint notes, a keyring of trusted log keys, and artifact signature
//! checks, using aws-lc-rs as the cryptographic backend.

pub mod artifact;
pub mod error;
pub mod hash;
pub mod keyring;
pub mod note;
pub mod verification;

pub use artifact::{public_key_from_pem, verify_artifact_signature};
pub use error::{Error, Result};
pub use hash::sha256;
pub use keyring::Keyring;
pub use note::{compute_key_hint, NoteSignature, NoteVerifier, SignedNote};
pub use verification::{SigningScheme, VerificationKey};
