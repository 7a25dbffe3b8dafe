//! Signature verification using aws-lc-rs

use crate::error::{Error, Result};
use aws_lc_rs::signature::{
    UnparsedPublicKey, ECDSA_P256_SHA256_ASN1, ECDSA_P384_SHA384_ASN1, ED25519,
};
use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, SECP_256_R_1, SECP_384_R_1};
use const_oid::db::rfc8410::ID_ED_25519;
use const_oid::ObjectIdentifier;
use spki::SubjectPublicKeyInfoRef;

/// Signature schemes used by transparency logs and their clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningScheme {
    /// ECDSA P-256 with SHA-256, ASN.1 DER signatures
    EcdsaP256Sha256,
    /// ECDSA P-384 with SHA-384, ASN.1 DER signatures
    EcdsaP384Sha384,
    /// Ed25519
    Ed25519,
}

impl SigningScheme {
    pub fn name(&self) -> &'static str {
        match self {
            SigningScheme::EcdsaP256Sha256 => "ECDSA_P256_SHA256",
            SigningScheme::EcdsaP384Sha384 => "ECDSA_P384_SHA384",
            SigningScheme::Ed25519 => "ED25519",
        }
    }
}

impl std::fmt::Display for SigningScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A public key for verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    /// Raw public key bytes (uncompressed point for ECDSA, 32 bytes for Ed25519)
    bytes: Vec<u8>,
    scheme: SigningScheme,
}

impl VerificationKey {
    /// Create a verification key from raw key bytes
    pub fn new(bytes: Vec<u8>, scheme: SigningScheme) -> Self {
        Self { bytes, scheme }
    }

    /// Create a verification key from a DER-encoded SubjectPublicKeyInfo
    ///
    /// The scheme is taken from the SPKI algorithm identifier.
    pub fn from_spki(der: &[u8]) -> Result<Self> {
        let spki = SubjectPublicKeyInfoRef::try_from(der)
            .map_err(|e| Error::InvalidKey(format!("failed to parse SPKI: {}", e)))?;

        let scheme = if spki.algorithm.oid == ID_ED_25519 {
            SigningScheme::Ed25519
        } else if spki.algorithm.oid == ID_EC_PUBLIC_KEY {
            let params = spki.algorithm.parameters.ok_or_else(|| {
                Error::InvalidKey("EC key missing curve parameters".to_string())
            })?;
            let curve = ObjectIdentifier::from_bytes(params.value())
                .map_err(|e| Error::InvalidKey(format!("failed to parse EC curve OID: {}", e)))?;
            if curve == SECP_256_R_1 {
                SigningScheme::EcdsaP256Sha256
            } else if curve == SECP_384_R_1 {
                SigningScheme::EcdsaP384Sha384
            } else {
                return Err(Error::UnsupportedAlgorithm(format!("EC curve {}", curve)));
            }
        } else {
            return Err(Error::UnsupportedAlgorithm(format!(
                "public key algorithm {}",
                spki.algorithm.oid
            )));
        };

        tracing::debug!(scheme = %scheme, "loaded verification key");
        Ok(Self::new(spki.subject_public_key.raw_bytes().to_vec(), scheme))
    }

    pub fn scheme(&self) -> SigningScheme {
        self.scheme
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Verify a signature over data
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        let result = match self.scheme {
            SigningScheme::EcdsaP256Sha256 => {
                UnparsedPublicKey::new(&ECDSA_P256_SHA256_ASN1, &self.bytes).verify(data, signature)
            }
            SigningScheme::EcdsaP384Sha384 => {
                UnparsedPublicKey::new(&ECDSA_P384_SHA384_ASN1, &self.bytes).verify(data, signature)
            }
            SigningScheme::Ed25519 => {
                UnparsedPublicKey::new(&ED25519, &self.bytes).verify(data, signature)
            }
        };
        result.map_err(|_| Error::Verification(format!("{} signature invalid", self.scheme)))
    }
}


#[cfg(test)]
mod tests {
    use super::test_keys::TestKey;
    use super::*;

    #[test]
    fn test_from_spki_ed25519() {
        let key = TestKey::ed25519();
        let vk = VerificationKey::from_spki(&key.spki_der()).unwrap();
        assert_eq!(vk.scheme(), SigningScheme::Ed25519);
        assert_eq!(vk.as_bytes().len(), 32);

        let sig = key.sign(b"test data");
        assert!(vk.verify(b"test data", &sig).is_ok());
        assert!(vk.verify(b"wrong data", &sig).is_err());
    }

    #[test]
    fn test_from_spki_p256() {
        let key = TestKey::p256();
        let vk = VerificationKey::from_spki(&key.spki_der()).unwrap();
        assert_eq!(vk.scheme(), SigningScheme::EcdsaP256Sha256);

        let sig = key.sign(b"test data");
        assert!(vk.verify(b"test data", &sig).is_ok());
    }

    #[test]
    fn test_verify_bad_signature() {
        let key = TestKey::ed25519();
        let vk = VerificationKey::from_spki(&key.spki_der()).unwrap();
        assert!(matches!(
            vk.verify(b"test data", &[0u8; 64]),
            Err(Error::Verification(_))
        ));
    }

    #[test]
    fn test_from_spki_rejects_garbage() {
        assert!(matches!(
            VerificationKey::from_spki(b"not a key"),
            Err(Error::InvalidKey(_))
        ));
    }
}
