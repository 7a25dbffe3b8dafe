use super::Context;
use anyhow::{bail, Context as _, Result};
use std::path::Path;
use tlog_crypto::{sha256, verify_artifact_signature};
use tlog_types::Digest;

/// Verify that the entry at `log_index` signs `artifact` and is included in the log
pub async fn run(ctx: &Context, log_index: u64, artifact: &Path) -> Result<()> {
    tracing::debug!(log_index, artifact = %artifact.display(), "verifying inclusion");

    let entry = ctx.client.get_entry_by_index(log_index).await?;
    let body = entry.hashed_rekord()?;

    let artifact_bytes = std::fs::read(artifact)
        .with_context(|| format!("failed to read artifact {}", artifact.display()))?;
    check_artifact_digest(&body.artifact_digest()?, &artifact_bytes)?;
    verify_artifact_signature(&body.public_key_pem()?, &body.signature()?, &artifact_bytes)
        .context("artifact signature verification failed")?;
    tracing::info!(log_index, "artifact signature verified");

    let rekor_proof = entry.rekor_inclusion_proof()?;
    let proof = rekor_proof.to_inclusion_proof()?;
    let checkpoint = rekor_proof.to_checkpoint()?;
    ctx.check_signature(&checkpoint)?;

    let leaf_hash = ctx.verifier.hasher().hash_leaf(&entry.body_bytes()?);
    let result = ctx.verifier.verify_inclusion(&leaf_hash, &proof, &checkpoint);
    ctx.print_roots(result.computed_root(), checkpoint.root_hash());
    result
        .into_result()
        .with_context(|| format!("inclusion proof for log index {} is invalid", log_index))?;

    println!("Verified inclusion");
    Ok(())
}

/// The artifact must hash to the digest recorded in the entry
pub fn check_artifact_digest(expected: &Digest, artifact: &[u8]) -> Result<()> {
    let actual = Digest::from(sha256(artifact));
    if &actual != expected {
        bail!(
            "artifact digest mismatch: entry records {}, artifact hashes to {}",
            expected,
            actual
        );
    }
    Ok(())
}
