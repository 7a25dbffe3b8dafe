//! In-memory reference tree following the recursive definitions of RFC 6962 §2.1
//!
//! Used only to produce expected roots and proofs for the verifier tests.

#![allow(dead_code)]

use tlog_merkle::{LogHasher, DEFAULT_HASHER};
use tlog_types::Digest;

pub struct ReferenceTree {
    hasher: LogHasher,
    leaves: Vec<Digest>,
}

impl ReferenceTree {
    /// Build a SHA-256 tree whose leaf `i` holds the data `leaf-{i}`
    pub fn with_size(size: u64) -> Self {
        Self::with_hasher(DEFAULT_HASHER, size)
    }

    pub fn with_hasher(hasher: LogHasher, size: u64) -> Self {
        let leaves = (0..size)
            .map(|i| hasher.hash_leaf(format!("leaf-{}", i).as_bytes()))
            .collect();
        Self { hasher, leaves }
    }

    pub fn from_data<D: AsRef<[u8]>>(data: &[D]) -> Self {
        let leaves = data
            .iter()
            .map(|d| DEFAULT_HASHER.hash_leaf(d.as_ref()))
            .collect();
        Self {
            hasher: DEFAULT_HASHER,
            leaves,
        }
    }

    pub fn size(&self) -> u64 {
        self.leaves.len() as u64
    }

    pub fn leaf_hash(&self, index: u64) -> Digest {
        self.leaves[index as usize].clone()
    }

    /// MTH(D[0:size])
    pub fn root_at(&self, size: u64) -> Digest {
        self.mth(&self.leaves[..size as usize])
    }

    pub fn root(&self) -> Digest {
        self.root_at(self.size())
    }

    /// PATH(index, D[0:size])
    pub fn inclusion_path(&self, index: u64, size: u64) -> Vec<Digest> {
        self.path(index as usize, &self.leaves[..size as usize])
    }

    /// PROOF(old_size, D[0:new_size]); empty for an empty old tree
    pub fn consistency_path(&self, old_size: u64, new_size: u64) -> Vec<Digest> {
        if old_size == 0 {
            return Vec::new();
        }
        self.subproof(old_size as usize, &self.leaves[..new_size as usize], true)
    }

    fn mth(&self, leaves: &[Digest]) -> Digest {
        match leaves.len() {
            0 => self.hasher.empty_root(),
            1 => leaves[0].clone(),
            n => {
                let k = split_point(n);
                self.hasher
                    .hash_children(&self.mth(&leaves[..k]), &self.mth(&leaves[k..]))
            }
        }
    }

    fn path(&self, m: usize, leaves: &[Digest]) -> Vec<Digest> {
        let n = leaves.len();
        if n <= 1 {
            return Vec::new();
        }
        let k = split_point(n);
        if m < k {
            let mut path = self.path(m, &leaves[..k]);
            path.push(self.mth(&leaves[k..]));
            path
        } else {
            let mut path = self.path(m - k, &leaves[k..]);
            path.push(self.mth(&leaves[..k]));
            path
        }
    }

    fn subproof(&self, m: usize, leaves: &[Digest], complete: bool) -> Vec<Digest> {
        let n = leaves.len();
        if m == n {
            return if complete {
                Vec::new()
            } else {
                vec![self.mth(leaves)]
            };
        }
        let k = split_point(n);
        if m <= k {
            let mut proof = self.subproof(m, &leaves[..k], complete);
            proof.push(self.mth(&leaves[k..]));
            proof
        } else {
            let mut proof = self.subproof(m - k, &leaves[k..], false);
            proof.push(self.mth(&leaves[..k]));
            proof
        }
    }
}

/// Largest power of two strictly less than `n` (n > 1)
fn split_point(n: usize) -> usize {
    let mut k = 1;
    while k << 1 < n {
        k <<= 1;
    }
    k
}

/// Copy of `digests` with bit `bit` of element `index` flipped
pub fn flip_bit(digests: &[Digest], index: usize, bit: usize) -> Vec<Digest> {
    let mut out: Vec<Digest> = digests.to_vec();
    let mut bytes = out[index].as_bytes().to_vec();
    bytes[bit / 8] ^= 1 << (bit % 8);
    out[index] = Digest::new(bytes);
    out
}
