//! Artifact signature verification
//!
//! A `hashedrekord` entry carries the signer's key either as a PEM public key
//! or as a PEM certificate; the signature covers the artifact bytes.

use crate::error::{Error, Result};
use crate::verification::VerificationKey;
use x509_cert::der::{Decode, Encode};
use x509_cert::Certificate;

/// Load a verification key from a PEM `PUBLIC KEY` or `CERTIFICATE` block
pub fn public_key_from_pem(pem_str: &str) -> Result<VerificationKey> {
    let parsed =
        pem::parse(pem_str).map_err(|e| Error::Pem(format!("failed to parse PEM: {}", e)))?;

    match parsed.tag() {
        "PUBLIC KEY" => VerificationKey::from_spki(parsed.contents()),
        "CERTIFICATE" => {
            let cert = Certificate::from_der(parsed.contents()).map_err(|e| {
                Error::InvalidCertificate(format!("failed to parse certificate: {}", e))
            })?;
            let spki_der = cert
                .tbs_certificate
                .subject_public_key_info
                .to_der()
                .map_err(|e| Error::InvalidCertificate(format!("failed to encode SPKI: {}", e)))?;
            VerificationKey::from_spki(&spki_der)
        }
        other => Err(Error::Pem(format!(
            "expected PUBLIC KEY or CERTIFICATE PEM block, got {}",
            other
        ))),
    }
}

/// Verify `signature` over `artifact` with the key or certificate in `key_pem`
pub fn verify_artifact_signature(key_pem: &str, signature: &[u8], artifact: &[u8]) -> Result<()> {
    let key = public_key_from_pem(key_pem)?;
    key.verify(artifact, signature)?;
    tracing::debug!(scheme = %key.scheme(), "artifact signature verified");
    Ok(())
}
