//! Typed `hashedrekord` v0.0.1 entry body
//!
//! The decoded body of a Rekor entry is the Merkle leaf; for artifact checks
//! only the `hashedrekord` kind is interpreted.

use crate::error::{Error, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tlog_types::Digest;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashedRekordBody {
    pub api_version: String,
    pub kind: String,
    pub spec: HashedRekordSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashedRekordSpec {
    pub data: HashedRekordData,
    pub signature: HashedRekordSignature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashedRekordData {
    pub hash: HashValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashValue {
    /// Lowercase algorithm name, e.g. "sha256"
    pub algorithm: String,
    /// Hex-encoded digest
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashedRekordSignature {
    /// Base64-encoded signature
    pub content: String,
    pub public_key: PublicKeyContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyContent {
    /// Base64-encoded PEM public key or certificate
    pub content: String,
}

impl HashedRekordBody {
    /// Parse a decoded entry body, rejecting other entry kinds
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let body: HashedRekordBody = serde_json::from_slice(bytes)?;
        if body.kind != "hashedrekord" {
            return Err(Error::InvalidResponse(format!(
                "unsupported entry kind {} (version {})",
                body.kind, body.api_version
            )));
        }
        Ok(body)
    }

    /// The SHA-256 digest of the signed artifact
    pub fn artifact_digest(&self) -> Result<Digest> {
        let hash = &self.spec.data.hash;
        if !hash.algorithm.eq_ignore_ascii_case("sha256") {
            return Err(Error::InvalidResponse(format!(
                "unsupported artifact hash algorithm {}",
                hash.algorithm
            )));
        }
        Ok(Digest::from_hex(&hash.value)?)
    }

    pub fn signature(&self) -> Result<Vec<u8>> {
        Ok(base64::engine::general_purpose::STANDARD.decode(&self.spec.signature.content)?)
    }

    /// The signer's PEM public key or certificate
    pub fn public_key_pem(&self) -> Result<String> {
        let pem = base64::engine::general_purpose::STANDARD
            .decode(&self.spec.signature.public_key.content)?;
        String::from_utf8(pem)
            .map_err(|_| Error::InvalidResponse("public key is not UTF-8 PEM".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_json(kind: &str, algorithm: &str) -> String {
        format!(
            r#"{{"apiVersion":"0.0.1","kind":"{}","spec":{{"data":{{"hash":{{"algorithm":"{}","value":"2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"}}}},"signature":{{"content":"c2lnbmF0dXJl","publicKey":{{"content":"LS0tLS1CRUdJTiBQVUJMSUMgS0VZLS0tLS0K"}}}}}}}}"#,
            kind, algorithm
        )
    }

    #[test]
    fn test_parse_hashed_rekord() {
        let body = HashedRekordBody::from_bytes(body_json("hashedrekord", "sha256").as_bytes())
            .unwrap();
        assert_eq!(
            body.artifact_digest().unwrap().to_hex(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(body.signature().unwrap(), b"signature");
        assert_eq!(body.public_key_pem().unwrap(), "-----BEGIN PUBLIC KEY-----\n");
    }

    #[test]
    fn test_other_kinds_rejected() {
        let err = HashedRekordBody::from_bytes(body_json("intoto", "sha256").as_bytes())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[test]
    fn test_other_hash_algorithms_rejected() {
        let body =
            HashedRekordBody::from_bytes(body_json("hashedrekord", "sha512").as_bytes()).unwrap();
        assert!(body.artifact_digest().is_err());
    }
}
