//! Rekor transparency log client
//!
//! This crate fetches checkpoints, entries and proofs from a Rekor v1
//! instance and converts them into the value types verified by `tlog-merkle`.

pub mod body;
pub mod client;
pub mod entry;
pub mod error;

pub use body::HashedRekordBody;
pub use client::{ClientOptions, LogClient, RekorClient};
pub use entry::{LogEntry, LogInfo, RekorConsistencyProof, RekorInclusionProof, Verification};
pub use error::{Error, Result};
