use super::Context;
use anyhow::{Context as _, Result};
use std::path::Path;
use tlog_rekor::LogInfo;

/// File the latest checkpoint is saved to in debug mode
pub const CHECKPOINT_FILE: &str = "checkpoint.json";

/// Fetch the latest checkpoint and print it as JSON
pub async fn run(ctx: &Context) -> Result<LogInfo> {
    tracing::debug!(url = ctx.client.url(), "fetching latest checkpoint");
    let info = ctx.client.get_log_info().await?;

    let checkpoint = info.to_checkpoint()?;
    ctx.check_signature(&checkpoint)?;

    let json = serde_json::to_string_pretty(&info)?;
    if ctx.debug {
        write_checkpoint(Path::new(CHECKPOINT_FILE), &json)?;
    }
    println!("{}", json);
    Ok(info)
}

pub fn write_checkpoint(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "saved checkpoint");
    Ok(())
}
