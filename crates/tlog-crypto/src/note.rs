//! Signed note parsing and verification
//!
//! Rekor checkpoints are published in the signed note format of
//! golang.org/x/mod/sumdb/note: a text body, a blank line, then one or more
//! signature lines.
//!
//! ```text
//! <origin>
//! <tree_size>
//! <root_hash_base64>
//! <optional_metadata>
//!
//! — <signer_name> <base64(key_hint || signature)>
//! ```
//!
//! Signature lines begin with the Unicode em dash (U+2014), not an ASCII hyphen.
//! The signed message is the body including its final newline.

use crate::error::{Error, Result};
use crate::hash::sha256;
use base64::Engine;
use tlog_types::Checkpoint;

/// A single signature line of a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSignature {
    /// The name of the signer (appears after the em dash)
    pub name: String,

    /// First 4 bytes of SHA-256 over the signer's SPKI DER
    pub key_hint: [u8; 4],

    /// The signature bytes following the key hint
    pub signature: Vec<u8>,
}

impl NoteSignature {
    /// Parse a signature line: `— <name> <base64_signature>`
    pub fn from_line(line: &str) -> Result<Self> {
        let rest = line
            .strip_prefix('—')
            .ok_or_else(|| Error::Note("signature line must start with em dash".to_string()))?;

        let mut parts = rest.split_whitespace();
        let (Some(name), Some(signature_b64), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::Note(
                "signature line must have format: — <name> <base64_signature>".to_string(),
            ));
        };

        let decoded = base64::engine::general_purpose::STANDARD.decode(signature_b64)?;
        if decoded.len() < 5 {
            return Err(Error::Note(
                "signature too short for a 4-byte key hint and signature".to_string(),
            ));
        }

        let mut key_hint = [0u8; 4];
        key_hint.copy_from_slice(&decoded[..4]);

        Ok(NoteSignature {
            name: name.to_string(),
            key_hint,
            signature: decoded[4..].to_vec(),
        })
    }
}

/// A checkpoint together with its signatures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedNote {
    /// The parsed checkpoint body; carries the raw note as its signed note
    pub checkpoint: Checkpoint,

    /// The exact signed message: the body plus its trailing newline
    pub checkpoint_text: String,

    pub signatures: Vec<NoteSignature>,
}

impl SignedNote {
    /// Parse a signed note from text
    pub fn from_text(text: &str) -> Result<Self> {
        let Some((body, signatures_text)) = text.split_once("\n\n") else {
            return Err(Error::Note("missing blank line separator".to_string()));
        };
        if signatures_text.contains("\n\n") {
            return Err(Error::Note("multiple blank line separators".to_string()));
        }

        let checkpoint = Checkpoint::from_text(text)?;

        let signatures = signatures_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(NoteSignature::from_line)
            .collect::<Result<Vec<_>>>()?;

        if signatures.is_empty() {
            return Err(Error::Note("no signatures found".to_string()));
        }

        Ok(SignedNote {
            checkpoint,
            checkpoint_text: format!("{}\n", body),
            signatures,
        })
    }

    /// Signatures carrying the given key hint
    pub fn signatures_by_key_hint<'a>(
        &'a self,
        key_hint: &'a [u8; 4],
    ) -> impl Iterator<Item = &'a NoteSignature> + 'a {
        self.signatures
            .iter()
            .filter(move |sig| &sig.key_hint == key_hint)
    }
}

/// Compute the key hint of a public key: the first 4 bytes of SHA-256 over its SPKI DER
pub fn compute_key_hint(public_key_der: &[u8]) -> [u8; 4] {
    let hash = sha256(public_key_der);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Decides whether a signed note comes from a trusted log
///
/// Merkle verification never consults this; it is the injected trust store
/// used before a checkpoint is accepted.
pub trait NoteVerifier: Send + Sync {
    fn verify_note(&self, note: &SignedNote) -> Result<()>;
}
