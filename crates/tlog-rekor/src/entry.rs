//! Rekor v1 API response types
//!
//! The v1 API encodes hashes as hex strings and sizes as signed integers.
//! Conversions into `tlog-types` values validate both and cross-check every
//! signed tree head against the size and root reported next to it.

use crate::body::HashedRekordBody;
use crate::error::{Error, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tlog_types::{Checkpoint, ConsistencyProof, Digest, InclusionProof};

/// A log entry from Rekor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// UUID of the entry (the key in the response map)
    #[serde(skip)]
    pub uuid: String,
    /// Base64-encoded canonicalized body; its decoded bytes are the Merkle leaf
    pub body: String,
    /// Integrated time (Unix timestamp)
    pub integrated_time: i64,
    /// Log ID (hex-encoded SHA-256 of the log's public key)
    #[serde(rename = "logID")]
    pub log_id: String,
    /// Global log index across all shards
    pub log_index: i64,
    #[serde(default)]
    pub verification: Option<Verification>,
}

/// Verification data for a log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    #[serde(default)]
    pub inclusion_proof: Option<RekorInclusionProof>,
    /// Signed entry timestamp (SET), base64
    #[serde(default)]
    pub signed_entry_timestamp: Option<String>,
}

/// Inclusion proof as returned by the Rekor v1 API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RekorInclusionProof {
    /// Signed tree head the proof was computed against
    pub checkpoint: String,
    /// Hex-encoded hashes, leaf to root
    pub hashes: Vec<String>,
    /// Index of the entry within its shard's tree
    pub log_index: i64,
    /// Hex-encoded root hash
    pub root_hash: String,
    pub tree_size: i64,
}

/// Log info response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInfo {
    /// Hex-encoded root hash of the active tree
    pub root_hash: String,
    /// Signed tree head (checkpoint note)
    pub signed_tree_head: String,
    #[serde(rename = "treeID")]
    pub tree_id: String,
    pub tree_size: i64,
    #[serde(default)]
    pub inactive_shards: Vec<InactiveShard>,
}

/// Inactive shard info
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InactiveShard {
    pub root_hash: String,
    pub signed_tree_head: String,
    #[serde(rename = "treeID")]
    pub tree_id: String,
    pub tree_size: i64,
}

/// Consistency proof response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RekorConsistencyProof {
    /// Hex-encoded root hash of the larger tree
    pub root_hash: String,
    /// Hex-encoded proof hashes
    #[serde(default)]
    pub hashes: Vec<String>,
}

/// Response from the entries endpoints (map of UUID to LogEntry)
pub type LogEntryResponse = HashMap<String, LogEntry>;

impl LogEntry {
    /// Decoded body bytes
    pub fn body_bytes(&self) -> Result<Vec<u8>> {
        Ok(base64::engine::general_purpose::STANDARD.decode(&self.body)?)
    }

    /// The body parsed as a `hashedrekord` entry
    pub fn hashed_rekord(&self) -> Result<HashedRekordBody> {
        HashedRekordBody::from_bytes(&self.body_bytes()?)
    }

    /// The raw inclusion proof, if the log returned one
    pub fn rekor_inclusion_proof(&self) -> Result<&RekorInclusionProof> {
        self.verification
            .as_ref()
            .and_then(|v| v.inclusion_proof.as_ref())
            .ok_or_else(|| {
                Error::InvalidResponse(format!("entry {} has no inclusion proof", self.uuid))
            })
    }
}

impl RekorInclusionProof {
    pub fn to_inclusion_proof(&self) -> Result<InclusionProof> {
        let leaf_index = non_negative("log index", self.log_index)?;
        let tree_size = non_negative("tree size", self.tree_size)?;
        let hashes = decode_hex_hashes(&self.hashes)?;
        Ok(InclusionProof::new(leaf_index, tree_size, hashes))
    }

    /// The signed tree head carried with the proof
    ///
    /// Fails if it names a different size or root than the proof itself.
    pub fn to_checkpoint(&self) -> Result<Checkpoint> {
        let checkpoint = Checkpoint::from_text(&self.checkpoint)?;
        cross_check(
            &checkpoint,
            non_negative("tree size", self.tree_size)?,
            &self.root_hash,
        )?;
        Ok(checkpoint)
    }
}

impl LogInfo {
    /// The signed tree head as a checkpoint
    ///
    /// Fails if it names a different size or root than the log info.
    pub fn to_checkpoint(&self) -> Result<Checkpoint> {
        let checkpoint = Checkpoint::from_text(&self.signed_tree_head)?;
        cross_check(
            &checkpoint,
            non_negative("tree size", self.tree_size)?,
            &self.root_hash,
        )?;
        Ok(checkpoint)
    }
}

impl RekorConsistencyProof {
    pub fn to_consistency_proof(
        &self,
        first_size: u64,
        second_size: u64,
    ) -> Result<ConsistencyProof> {
        Ok(ConsistencyProof::new(
            first_size,
            second_size,
            decode_hex_hashes(&self.hashes)?,
        ))
    }

    pub fn root_hash(&self) -> Result<Digest> {
        Ok(Digest::from_hex(&self.root_hash)?)
    }
}

fn non_negative(what: &str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| Error::InvalidResponse(format!("negative {}: {}", what, value)))
}

fn decode_hex_hashes(hashes: &[String]) -> Result<Vec<Digest>> {
    hashes
        .iter()
        .map(|h| Digest::from_hex(h).map_err(Error::from))
        .collect()
}

fn cross_check(checkpoint: &Checkpoint, tree_size: u64, root_hash_hex: &str) -> Result<()> {
    if checkpoint.tree_size() != tree_size {
        return Err(Error::InvalidResponse(format!(
            "checkpoint tree size {} does not match reported tree size {}",
            checkpoint.tree_size(),
            tree_size
        )));
    }
    let root_hash = Digest::from_hex(root_hash_hex)?;
    if checkpoint.root_hash() != &root_hash {
        return Err(Error::InvalidResponse(format!(
            "checkpoint root hash {} does not match reported root hash {}",
            checkpoint.root_hash(),
            root_hash
        )));
    }
    Ok(())
}
