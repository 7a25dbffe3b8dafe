//! Hash algorithm identifiers

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Hash algorithms a log can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA2-256
    #[default]
    #[serde(rename = "SHA2_256")]
    Sha2256,
    /// SHA2-384
    #[serde(rename = "SHA2_384")]
    Sha2384,
    /// SHA2-512
    #[serde(rename = "SHA2_512")]
    Sha2512,
}

impl HashAlgorithm {
    /// Get the digest size in bytes for this algorithm
    pub const fn digest_size(&self) -> usize {
        match self {
            HashAlgorithm::Sha2256 => 32,
            HashAlgorithm::Sha2384 => 48,
            HashAlgorithm::Sha2512 => 64,
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::Sha2256 => write!(f, "SHA2_256"),
            HashAlgorithm::Sha2384 => write!(f, "SHA2_384"),
            HashAlgorithm::Sha2512 => write!(f, "SHA2_512"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    /// Accepts the canonical names as well as the lowercase forms used by the
    /// Rekor API (`sha256`, `sha384`, `sha512`).
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sha2_256" | "sha256" | "sha-256" => Ok(HashAlgorithm::Sha2256),
            "sha2_384" | "sha384" | "sha-384" => Ok(HashAlgorithm::Sha2384),
            "sha2_512" | "sha512" | "sha-512" => Ok(HashAlgorithm::Sha2512),
            _ => Err(Error::InvalidHashAlgorithm(s.to_string())),
        }
    }
}
