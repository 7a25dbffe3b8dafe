//! Rekor proof verifier
//!
//! Library half of the `rekor-verifier` binary: argument parsing,
//! environment configuration and the three commands.

pub mod cli;
pub mod commands;
pub mod config;

use anyhow::{anyhow, Result};
use cli::Args;
use commands::Context;
use config::VerifierConfig;

/// Run every command selected by `args`
pub async fn run(args: Args) -> Result<()> {
    let prev = if args.consistency {
        Some(args.prev_checkpoint().map_err(|message| anyhow!(message))?)
    } else {
        None
    };

    let config = VerifierConfig::from_env()?;
    tracing::debug!(?config, "loaded configuration");
    let ctx = Context::from_config(&config, args.tree_id.clone(), args.debug)?;

    if args.checkpoint {
        commands::checkpoint::run(&ctx).await?;
    }

    if let Some(log_index) = args.inclusion {
        let artifact = args
            .artifact
            .as_deref()
            .ok_or_else(|| anyhow!("please specify an artifact to verify"))?;
        commands::inclusion::run(&ctx, log_index, artifact).await?;
    }

    if let Some(prev) = prev {
        commands::consistency::run(&ctx, &prev).await?;
    }

    Ok(())
}
