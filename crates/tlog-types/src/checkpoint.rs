//! Checkpoint (signed tree head) types
//!
//! A checkpoint represents a commitment to the state of a transparency log.
//! Format specified in: https://github.com/transparency-dev/formats/blob/main/log/README.md

use crate::encoding::Digest;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A checkpoint (signed tree head) from a transparency log
///
/// Checkpoints are immutable once built. Signature checking is not done here;
/// see the signed note support in `tlog-crypto`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    origin: String,
    tree_size: u64,
    root_hash: Digest,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    other_content: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signed_note: Option<String>,
}

impl Checkpoint {
    /// Create a checkpoint for a tree of `tree_size` leaves with the given root
    pub fn new(origin: impl Into<String>, tree_size: u64, root_hash: Digest) -> Self {
        Self {
            origin: origin.into(),
            tree_size,
            root_hash,
            other_content: Vec::new(),
            signed_note: None,
        }
    }

    /// Attach extension lines that follow the root hash in the note body
    pub fn with_other_content(mut self, other_content: Vec<String>) -> Self {
        self.other_content = other_content;
        self
    }

    /// Attach the raw signed representation this checkpoint was read from
    pub fn with_signed_note(mut self, note: impl Into<String>) -> Self {
        self.signed_note = Some(note.into());
        self
    }

    /// The origin string identifying the log
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Tree size (number of leaves)
    pub fn tree_size(&self) -> u64 {
        self.tree_size
    }

    /// Root hash of the Merkle tree
    pub fn root_hash(&self) -> &Digest {
        &self.root_hash
    }

    /// Other data lines (optional extension data)
    pub fn other_content(&self) -> &[String] {
        &self.other_content
    }

    /// The raw signed note, if the checkpoint was parsed from one
    pub fn signed_note(&self) -> Option<&str> {
        self.signed_note.as_deref()
    }

    /// Parse a checkpoint from its text representation
    ///
    /// Format:
    /// ```text
    /// <origin>
    /// <tree_size>
    /// <root_hash_base64>
    /// [other_content...]
    ///
    /// — <name> <key_id_and_signature_base64>
    /// ```
    ///
    /// Only the body is interpreted. When a signature block follows the blank
    /// line, the whole text is kept as the checkpoint's signed note.
    pub fn from_text(text: &str) -> Result<Self> {
        let (body, signed) = match text.split_once("\n\n") {
            Some((body, _)) => (body, true),
            None => (text, false),
        };

        let mut lines = body.lines();

        let origin = lines
            .next()
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .ok_or_else(|| Error::InvalidCheckpoint("missing origin".to_string()))?
            .to_string();

        let tree_size_str = lines
            .next()
            .ok_or_else(|| Error::InvalidCheckpoint("missing tree size".to_string()))?;
        let tree_size = tree_size_str.trim().parse::<u64>().map_err(|_| {
            Error::InvalidCheckpoint(format!("invalid tree size: {}", tree_size_str))
        })?;

        let root_hash_b64 = lines
            .next()
            .ok_or_else(|| Error::InvalidCheckpoint("missing root hash".to_string()))?;
        let root_hash = Digest::from_base64(root_hash_b64.trim())
            .map_err(|e| Error::InvalidCheckpoint(format!("invalid root hash: {}", e)))?;

        let other_content = lines
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        let checkpoint =
            Checkpoint::new(origin, tree_size, root_hash).with_other_content(other_content);
        Ok(if signed {
            checkpoint.with_signed_note(text)
        } else {
            checkpoint
        })
    }

    /// Encode the checkpoint to its text representation (without signatures)
    pub fn to_signed_note_body(&self) -> String {
        let mut result = format!(
            "{}\n{}\n{}\n",
            self.origin,
            self.tree_size,
            self.root_hash.to_base64()
        );

        for line in &self.other_content {
            result.push_str(line);
            result.push('\n');
        }

        result
    }
}
