//! Merkle proof verification
//!
//! Implements inclusion proof and consistency proof verification as specified in RFC 6962.
//! Both proofs are checked with the decomposition method of the transparency-dev
//! reference verifier: a path splits into an "inner" part below the point where the
//! leaf's path leaves the complete left subtrees, and a "border" part along the
//! right edge of the tree. Only hashes on the path are ever computed.

use crate::error::{Error, Result};
use crate::tree::{bit_length, trailing_zeros, LogHasher};
use tlog_types::Digest;

/// Compute the root hash implied by an inclusion proof
///
/// # Arguments
/// * `hasher` - The log's hasher
/// * `leaf_index` - Index of the leaf in the tree (0-based)
/// * `tree_size` - Total number of leaves in the tree
/// * `leaf_hash` - The hash of the leaf entry
/// * `proof_hashes` - The hashes in the inclusion proof path, leaf to root
pub fn root_from_inclusion_proof(
    hasher: &LogHasher,
    leaf_index: u64,
    tree_size: u64,
    leaf_hash: &Digest,
    proof_hashes: &[Digest],
) -> Result<Digest> {
    if tree_size == 0 {
        return Err(Error::MalformedInput(
            "tree size cannot be zero".to_string(),
        ));
    }

    if leaf_index >= tree_size {
        return Err(Error::MalformedInput(format!(
            "leaf index {} >= tree size {}",
            leaf_index, tree_size
        )));
    }

    check_digest_len(hasher, "leaf hash", leaf_hash)?;
    check_path_digests(hasher, proof_hashes)?;

    let (inner, border) = decompose_inclusion_proof(leaf_index, tree_size);
    let expected = inner + border;
    if proof_hashes.len() != expected {
        return Err(Error::PathLengthMismatch {
            expected,
            actual: proof_hashes.len(),
        });
    }

    let hash = chain_inner(hasher, leaf_hash, &proof_hashes[..inner], leaf_index);
    Ok(chain_border_right(hasher, &hash, &proof_hashes[inner..]))
}

/// Verify an inclusion proof for a leaf in a Merkle tree
///
/// Returns the computed root, which equals `expected_root` on success.
pub fn verify_inclusion_proof(
    hasher: &LogHasher,
    leaf_hash: &Digest,
    leaf_index: u64,
    tree_size: u64,
    proof_hashes: &[Digest],
    expected_root: &Digest,
) -> Result<Digest> {
    check_digest_len(hasher, "root hash", expected_root)?;

    let calculated =
        root_from_inclusion_proof(hasher, leaf_index, tree_size, leaf_hash, proof_hashes)?;
    verify_match(tree_size, &calculated, expected_root)?;

    Ok(calculated)
}

/// Verify a consistency proof between two tree states
///
/// # Arguments
/// * `hasher` - The log's hasher
/// * `old_size` - Size of the older tree
/// * `new_size` - Size of the newer tree
/// * `proof_hashes` - The hashes in the consistency proof
/// * `old_root` - Root hash of the older tree
/// * `new_root` - Root hash of the newer tree
///
/// Returns the computed root of the newer tree on success.
pub fn verify_consistency_proof(
    hasher: &LogHasher,
    old_size: u64,
    new_size: u64,
    proof_hashes: &[Digest],
    old_root: &Digest,
    new_root: &Digest,
) -> Result<Digest> {
    if old_size > new_size {
        return Err(Error::MalformedInput(format!(
            "old size {} > new size {}",
            old_size, new_size
        )));
    }

    check_digest_len(hasher, "old root hash", old_root)?;
    check_digest_len(hasher, "new root hash", new_root)?;
    check_path_digests(hasher, proof_hashes)?;

    if old_size == new_size {
        if !proof_hashes.is_empty() {
            return Err(Error::PathLengthMismatch {
                expected: 0,
                actual: proof_hashes.len(),
            });
        }
        verify_match(new_size, new_root, old_root)?;
        return Ok(new_root.clone());
    }

    // An empty tree is consistent with any tree
    if old_size == 0 {
        if !proof_hashes.is_empty() {
            return Err(Error::PathLengthMismatch {
                expected: 0,
                actual: proof_hashes.len(),
            });
        }
        return Ok(new_root.clone());
    }

    // Normal case: 0 < old_size < new_size. The path of the last old leaf
    // shares its lowest `shift` levels with a complete subtree of the old tree.
    let shift = trailing_zeros(old_size) as usize;
    let (inner, border) = decompose_inclusion_proof(old_size - 1, new_size);
    let inner = inner.saturating_sub(shift);

    // The proof starts with the root of that subtree, unless the old tree
    // is itself a complete tree of size 2^shift
    let start = if old_size == 1 << shift { 0 } else { 1 };

    let expected = start + inner + border;
    if proof_hashes.len() != expected {
        return Err(Error::PathLengthMismatch {
            expected,
            actual: proof_hashes.len(),
        });
    }

    let seed = if start == 0 { old_root } else { &proof_hashes[0] };
    let proof = &proof_hashes[start..];
    let mask = (old_size - 1) >> shift;

    // Old root: only the siblings hanging to the left belong to the old tree
    let hash1 = chain_inner_right(hasher, seed, &proof[..inner], mask);
    let calc_old_root = chain_border_right(hasher, &hash1, &proof[inner..]);
    verify_match(old_size, &calc_old_root, old_root)?;

    // New root: the full path
    let hash2 = chain_inner(hasher, seed, &proof[..inner], mask);
    let calc_new_root = chain_border_right(hasher, &hash2, &proof[inner..]);
    verify_match(new_size, &calc_new_root, new_root)?;

    Ok(calc_new_root)
}

/// Decompose an inclusion proof into inner and border path lengths
///
/// Returns (inner_path_length, border_path_length)
pub(crate) fn decompose_inclusion_proof(index: u64, tree_size: u64) -> (usize, usize) {
    let inner = inner_proof_size(index, tree_size);
    let border = (index >> inner).count_ones() as usize;
    (inner, border)
}

/// Calculate the inner proof size for a given index and tree size
fn inner_proof_size(index: u64, tree_size: u64) -> usize {
    bit_length(index ^ (tree_size - 1)) as usize
}

/// Chain hashes along the inner proof path
///
/// Bit `i` of `index` says whether the running hash is a left (0) or right (1) child at level `i`.
fn chain_inner(hasher: &LogHasher, seed: &Digest, proof: &[Digest], index: u64) -> Digest {
    let mut hash = seed.clone();
    for (i, p) in proof.iter().enumerate() {
        if (index >> i) & 1 == 0 {
            hash = hasher.hash_children(&hash, p);
        } else {
            hash = hasher.hash_children(p, &hash);
        }
    }
    hash
}

/// Chain hashes along the inner proof path, keeping only left siblings
///
/// Right siblings lie beyond the old tree's right edge and are skipped.
fn chain_inner_right(hasher: &LogHasher, seed: &Digest, proof: &[Digest], index: u64) -> Digest {
    let mut hash = seed.clone();
    for (i, p) in proof.iter().enumerate() {
        if (index >> i) & 1 == 1 {
            hash = hasher.hash_children(p, &hash);
        }
    }
    hash
}

/// Chain hashes along the right border (all proof hashes go on the left)
fn chain_border_right(hasher: &LogHasher, seed: &Digest, proof: &[Digest]) -> Digest {
    let mut hash = seed.clone();
    for p in proof {
        hash = hasher.hash_children(p, &hash);
    }
    hash
}

fn verify_match(tree_size: u64, calculated: &Digest, expected: &Digest) -> Result<()> {
    if calculated != expected {
        return Err(Error::RootMismatch {
            tree_size,
            expected: expected.clone(),
            calculated: calculated.clone(),
        });
    }
    Ok(())
}

pub(crate) fn check_digest_len(hasher: &LogHasher, what: &str, digest: &Digest) -> Result<()> {
    if digest.len() != hasher.size() {
        return Err(Error::MalformedInput(format!(
            "{} has unexpected size {}, want {}",
            what,
            digest.len(),
            hasher.size()
        )));
    }
    Ok(())
}

pub(crate) fn check_path_digests(hasher: &LogHasher, proof_hashes: &[Digest]) -> Result<()> {
    for (i, hash) in proof_hashes.iter().enumerate() {
        check_digest_len(hasher, &format!("proof hash {}", i), hash)?;
    }
    Ok(())
}
