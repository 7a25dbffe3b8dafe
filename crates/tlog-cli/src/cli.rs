//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;
use tlog_types::Digest;

/// Rekor Verifier
#[derive(Parser, Debug)]
#[command(name = "rekor-verifier", version, about = "Rekor Verifier")]
pub struct Args {
    /// Debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Obtain latest checkpoint from the Rekor server
    #[arg(short, long)]
    pub checkpoint: bool,

    /// Verify inclusion of an entry in the Rekor transparency log using its
    /// log index and the artifact file
    #[arg(long, value_name = "LOG_INDEX", requires = "artifact")]
    pub inclusion: Option<u64>,

    /// Artifact filepath for verifying the signature
    #[arg(long, value_name = "PATH")]
    pub artifact: Option<PathBuf>,

    /// Verify consistency of a given checkpoint with the latest checkpoint
    #[arg(long)]
    pub consistency: bool,

    /// Tree ID for consistency proof
    #[arg(long, value_parser = parse_tree_id)]
    pub tree_id: Option<String>,

    /// Tree size for consistency proof
    #[arg(long)]
    pub tree_size: Option<u64>,

    /// Root hash for consistency proof (hex)
    #[arg(long, value_parser = parse_root_hash)]
    pub root_hash: Option<Digest>,
}

/// The checkpoint a consistency check starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrevCheckpoint {
    pub tree_id: String,
    pub tree_size: u64,
    pub root_hash: Digest,
}

impl Args {
    /// The previous checkpoint named by `--tree-id`, `--tree-size` and `--root-hash`
    pub fn prev_checkpoint(&self) -> Result<PrevCheckpoint, String> {
        let tree_id = self
            .tree_id
            .clone()
            .ok_or("please specify tree id for prev checkpoint")?;
        let tree_size = self
            .tree_size
            .ok_or("please specify tree size for prev checkpoint")?;
        let root_hash = self
            .root_hash
            .clone()
            .ok_or("please specify root hash for prev checkpoint")?;
        Ok(PrevCheckpoint {
            tree_id,
            tree_size,
            root_hash,
        })
    }
}

fn parse_tree_id(s: &str) -> Result<String, String> {
    s.parse::<u64>()
        .map(|_| s.to_string())
        .map_err(|_| format!("tree id must be numeric, got {:?}", s))
}

/// Accepts a hex digest of any supported hash length; 64 characters for SHA2_256
fn parse_root_hash(s: &str) -> Result<Digest, String> {
    if !matches!(s.len(), 64 | 96 | 128) {
        return Err(format!(
            "root hash must be 64, 96 or 128 hex characters, got {}",
            s.len()
        ));
    }
    Digest::from_hex(s).map_err(|e| e.to_string())
}
