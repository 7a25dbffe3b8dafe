//! Merkle tree hashing utilities
//!
//! Implements RFC 6962 compliant Merkle tree hashing with:
//! - Domain separation via prefixes (0x00 for leaf, 0x01 for node)
//! - One configured hash function per [`LogHasher`] (SHA-256 by default)

use sha2::{Digest as _, Sha256, Sha384, Sha512};
use tlog_types::{Digest, HashAlgorithm};

/// Prefix for leaf nodes in RFC 6962 Merkle tree
pub const LEAF_HASH_PREFIX: u8 = 0x00;

/// Prefix for internal nodes in RFC 6962 Merkle tree
pub const NODE_HASH_PREFIX: u8 = 0x01;

/// The SHA-256 hasher used by Rekor and most RFC 6962 logs
pub const DEFAULT_HASHER: LogHasher = LogHasher::new(HashAlgorithm::Sha2256);

/// Domain-separated leaf and node hashing for one hash algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogHasher {
    algorithm: HashAlgorithm,
}

impl LogHasher {
    /// Create a hasher for the given algorithm
    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// The configured hash algorithm
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Digest length in bytes
    pub fn size(&self) -> usize {
        self.algorithm.digest_size()
    }

    /// Root hash of an empty tree: H("")
    pub fn empty_root(&self) -> Digest {
        self.hash_parts(&[])
    }

    /// Hash a leaf node
    ///
    /// Returns: H(0x00 || leaf_data)
    pub fn hash_leaf(&self, data: &[u8]) -> Digest {
        self.hash_parts(&[&[LEAF_HASH_PREFIX][..], data])
    }

    /// Hash two child nodes to create a parent node
    ///
    /// Returns: H(0x01 || left || right)
    pub fn hash_children(&self, left: &Digest, right: &Digest) -> Digest {
        self.hash_parts(&[&[NODE_HASH_PREFIX][..], left.as_bytes(), right.as_bytes()])
    }

    fn hash_parts(&self, parts: &[&[u8]]) -> Digest {
        match self.algorithm {
            HashAlgorithm::Sha2256 => digest_parts::<Sha256>(parts),
            HashAlgorithm::Sha2384 => digest_parts::<Sha384>(parts),
            HashAlgorithm::Sha2512 => digest_parts::<Sha512>(parts),
        }
    }
}

impl Default for LogHasher {
    fn default() -> Self {
        DEFAULT_HASHER
    }
}

fn digest_parts<H: sha2::Digest>(parts: &[&[u8]]) -> Digest {
    let mut hasher = H::new();
    for part in parts {
        hasher.update(part);
    }
    Digest::new(hasher.finalize().to_vec())
}

/// Hash a leaf with the default SHA-256 hasher
pub fn hash_leaf(data: &[u8]) -> Digest {
    DEFAULT_HASHER.hash_leaf(data)
}

/// Hash two children with the default SHA-256 hasher
pub fn hash_children(left: &Digest, right: &Digest) -> Digest {
    DEFAULT_HASHER.hash_children(left, right)
}

/// Calculate the number of trailing zeros in a number (LSB)
pub fn trailing_zeros(n: u64) -> u32 {
    if n == 0 {
        64
    } else {
        n.trailing_zeros()
    }
}

/// Calculate the position of the most significant bit
pub fn bit_length(n: u64) -> u32 {
    if n == 0 {
        0
    } else {
        64 - n.leading_zeros()
    }
}
