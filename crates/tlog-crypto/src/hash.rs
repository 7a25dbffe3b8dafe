//! SHA-256 via aws-lc-rs

use aws_lc_rs::digest::{digest, SHA256};

/// SHA-256 of `data`, used for key hints and artifact digests
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(digest(&SHA256, data).as_ref());
    out
}
