use super::Context;
use crate::cli::PrevCheckpoint;
use anyhow::{bail, Context as _, Result};
use tlog_rekor::LogClient;
use tlog_types::{Checkpoint, ConsistencyProof};

/// Verify that the latest checkpoint extends `prev`
pub async fn run(ctx: &Context, prev: &PrevCheckpoint) -> Result<()> {
    let info = ctx.client.get_log_info().await?;
    if info.tree_id != prev.tree_id {
        bail!(
            "previous checkpoint is from tree {}, the log is now serving tree {}",
            prev.tree_id,
            info.tree_id
        );
    }

    let latest = info.to_checkpoint()?;
    ctx.check_signature(&latest)?;
    tracing::debug!(
        prev_size = prev.tree_size,
        latest_size = latest.tree_size(),
        "verifying consistency"
    );

    // An empty tree or an unchanged one needs no proof hashes
    let proof = if prev.tree_size == 0 || prev.tree_size == latest.tree_size() {
        ConsistencyProof::new(prev.tree_size, latest.tree_size(), Vec::new())
    } else {
        ctx.client
            .fetch_consistency_proof(prev.tree_size, latest.tree_size())
            .await?
    };

    let first = Checkpoint::new(latest.origin(), prev.tree_size, prev.root_hash.clone());
    let result = ctx.verifier.verify_consistency(&first, &latest, &proof);
    ctx.print_roots(result.computed_root(), latest.root_hash());
    result.into_result().with_context(|| {
        format!(
            "log is not consistent between tree sizes {} and {}",
            prev.tree_size,
            latest.tree_size()
        )
    })?;

    println!("Verified consistency");
    Ok(())
}
