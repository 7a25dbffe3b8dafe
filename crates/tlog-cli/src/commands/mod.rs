//! Subcommand implementations

pub mod checkpoint;
pub mod consistency;
pub mod inclusion;

use crate::config::VerifierConfig;
use anyhow::{anyhow, Context as _, Result};
use tlog_crypto::{Keyring, NoteVerifier, SignedNote};
use tlog_merkle::Verifier;
use tlog_rekor::RekorClient;
use tlog_types::{Checkpoint, Digest};

/// Everything a command needs: the log, the verifier and the trusted log key
pub struct Context {
    pub client: RekorClient,
    pub verifier: Verifier,
    pub trust: Option<Box<dyn NoteVerifier>>,
    pub debug: bool,
}

impl Context {
    pub fn from_config(config: &VerifierConfig, tree_id: Option<String>, debug: bool) -> Result<Self> {
        let client = RekorClient::new(&config.rekor_url, config.client_options(tree_id))?;

        let trust = match &config.public_key_path {
            Some(path) => {
                let pem = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read log public key {}", path.display()))?;
                let mut keyring = Keyring::new();
                keyring
                    .add_pem(&pem)
                    .with_context(|| format!("invalid log public key {}", path.display()))?;
                Some(Box::new(keyring) as Box<dyn NoteVerifier>)
            }
            None => None,
        };

        Ok(Self {
            client,
            verifier: Verifier::new(config.hasher()),
            trust,
            debug,
        })
    }

    /// Check the checkpoint's note signature when a trusted key is configured
    pub fn check_signature(&self, checkpoint: &Checkpoint) -> Result<()> {
        let Some(trust) = &self.trust else {
            tracing::debug!("no trusted log key configured, checkpoint signature not checked");
            return Ok(());
        };

        let text = checkpoint
            .signed_note()
            .ok_or_else(|| anyhow!("checkpoint for tree size {} is not signed", checkpoint.tree_size()))?;
        let note = SignedNote::from_text(text)?;
        trust
            .verify_note(&note)
            .context("checkpoint signature verification failed")?;
        tracing::info!(origin = checkpoint.origin(), "checkpoint signature verified");
        Ok(())
    }

    fn print_roots(&self, computed: Option<&Digest>, given: &Digest) {
        if self.debug {
            match computed {
                Some(computed) => println!("Calculated root hash: {}", computed),
                None => println!("Calculated root hash: none"),
            }
            println!("Given root hash: {}", given);
        }
    }
}
