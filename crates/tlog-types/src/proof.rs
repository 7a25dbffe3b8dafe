//! Inclusion and consistency proof values
//!
//! Proofs are built from whatever an untrusted log returned. Nothing is
//! validated on construction; the verifiers in `tlog-merkle` reject
//! inconsistent sizes and wrong path lengths with a structured verdict.

use crate::encoding::Digest;
use serde::{Deserialize, Serialize};

/// An audit path proving one leaf is part of a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusionProof {
    leaf_index: u64,
    tree_size: u64,
    hashes: Vec<Digest>,
}

impl InclusionProof {
    /// Create an inclusion proof; `hashes` are ordered from the leaf toward the root
    pub fn new(leaf_index: u64, tree_size: u64, hashes: Vec<Digest>) -> Self {
        Self {
            leaf_index,
            tree_size,
            hashes,
        }
    }

    /// 0-based position of the leaf
    pub fn leaf_index(&self) -> u64 {
        self.leaf_index
    }

    /// Size of the tree the path was computed for
    pub fn tree_size(&self) -> u64 {
        self.tree_size
    }

    /// Sibling hashes, leaf to root
    pub fn hashes(&self) -> &[Digest] {
        &self.hashes
    }
}

/// A proof that a tree of `second_size` leaves extends one of `first_size`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyProof {
    first_size: u64,
    second_size: u64,
    hashes: Vec<Digest>,
}

impl ConsistencyProof {
    /// Create a consistency proof between two tree sizes
    pub fn new(first_size: u64, second_size: u64, hashes: Vec<Digest>) -> Self {
        Self {
            first_size,
            second_size,
            hashes,
        }
    }

    /// Size of the older tree
    pub fn first_size(&self) -> u64 {
        self.first_size
    }

    /// Size of the newer tree
    pub fn second_size(&self) -> u64 {
        self.second_size
    }

    /// Consistency path hashes
    pub fn hashes(&self) -> &[Digest] {
        &self.hashes
    }
}
