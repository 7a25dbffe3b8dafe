//! Keyring of trusted log keys
//!
//! Keys are indexed by their note key hint so that each signature line of a
//! checkpoint is checked only against the key it claims to come from.

use crate::error::{Error, Result};
use crate::note::{compute_key_hint, NoteVerifier, SignedNote};
use crate::verification::VerificationKey;
use std::collections::HashMap;

/// A keyring containing the verification keys of trusted logs
#[derive(Debug, Default)]
pub struct Keyring {
    keys: HashMap<[u8; 4], VerificationKey>,
}

impl Keyring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key under an explicit key hint
    pub fn add_key(&mut self, key_hint: [u8; 4], key: VerificationKey) {
        self.keys.insert(key_hint, key);
    }

    /// Add a DER-encoded SPKI key, returning its key hint
    pub fn add_spki(&mut self, der: &[u8]) -> Result<[u8; 4]> {
        let key = VerificationKey::from_spki(der)?;
        let key_hint = compute_key_hint(der);
        self.add_key(key_hint, key);
        Ok(key_hint)
    }

    /// Add a PEM `PUBLIC KEY` block, returning its key hint
    pub fn add_pem(&mut self, pem_str: &str) -> Result<[u8; 4]> {
        let parsed =
            pem::parse(pem_str).map_err(|e| Error::Pem(format!("failed to parse PEM: {}", e)))?;
        if parsed.tag() != "PUBLIC KEY" {
            return Err(Error::Pem(format!(
                "expected PUBLIC KEY PEM block, got {}",
                parsed.tag()
            )));
        }
        self.add_spki(parsed.contents())
    }

    pub fn get_key(&self, key_hint: &[u8; 4]) -> Option<&VerificationKey> {
        self.keys.get(key_hint)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl NoteVerifier for Keyring {
    fn verify_note(&self, note: &SignedNote) -> Result<()> {
        let message = note.checkpoint_text.as_bytes();

        for signature in &note.signatures {
            let Some(key) = self.get_key(&signature.key_hint) else {
                tracing::debug!(
                    signer = %signature.name,
                    key_hint = ?signature.key_hint,
                    "skipping signature from unknown key"
                );
                continue;
            };

            match key.verify(message, &signature.signature) {
                Ok(()) => {
                    tracing::debug!(signer = %signature.name, "checkpoint signature verified");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(signer = %signature.name, error = %e, "checkpoint signature rejected");
                }
            }
        }

        Err(Error::Verification(
            "no trusted key verified the checkpoint".to_string(),
        ))
    }
}
