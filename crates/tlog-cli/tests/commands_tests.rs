//! Command tests against a mock Rekor server

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{EcdsaKeyPair, KeyPair, ECDSA_P256_SHA256_ASN1_SIGNING};
use base64::Engine;
use rstest::rstest;
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;
use tlog_cli::cli::PrevCheckpoint;
use tlog_cli::commands::{checkpoint, consistency, inclusion, Context};
use tlog_cli::config::VerifierConfig;
use tlog_crypto::{compute_key_hint, sha256};
use tlog_merkle::{hash_children, hash_leaf};
use tlog_types::{Checkpoint, Digest};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Unsigned responses for a tree grown from 5 to 7 leaves
const LOG_INFO: &str = include_str!("../../tlog-rekor/tests/fixtures/log_info.json");
const CONSISTENCY_PROOF: &str =
    include_str!("../../tlog-rekor/tests/fixtures/consistency_proof.json");

const TREE_ID: &str = "1193050959916656506";
const ROOT_5: &str = "f3726d0ce0f61ed67830b4a148a38614eff67b802670d9c0b1c88b386336a91d";
const ROOT_7: &str = "5940f85840e20a3ee405f29ae866e3c7a53ac2a9f94b7b82029f1d8daea47e73";
const EMPTY_ROOT: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

const ORIGIN: &str = "rekor.test - 1193050959916656506";
const ENTRY_INDEX: u64 = 42;
const ARTIFACT: &[u8] = b"hello\n";

/// A P-256 key pair standing in for either the log or an artifact signer
struct TestSigner {
    key: EcdsaKeyPair,
}

impl TestSigner {
    fn generate() -> Self {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng).unwrap();
        let key =
            EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref()).unwrap();
        Self { key }
    }

    fn spki_der(&self) -> Vec<u8> {
        let mut der = hex::decode("3059301306072a8648ce3d020106082a8648ce3d030107034200").unwrap();
        der.extend_from_slice(self.key.public_key().as_ref());
        der
    }

    fn public_key_pem(&self) -> String {
        pem::encode(&pem::Pem::new("PUBLIC KEY", self.spki_der()))
    }

    fn sign(&self, data: &[u8]) -> Vec<u8> {
        self.key
            .sign(&SystemRandom::new(), data)
            .unwrap()
            .as_ref()
            .to_vec()
    }

    /// A checkpoint note signed by this key
    fn checkpoint(&self, origin: &str, tree_size: u64, root: &Digest) -> String {
        let body = format!("{}\n{}\n{}\n", origin, tree_size, root.to_base64());
        let mut signature = compute_key_hint(&self.spki_der()).to_vec();
        signature.extend_from_slice(&self.sign(body.as_bytes()));
        format!("{}\n— rekor.test {}\n", body, b64(&signature))
    }

    /// PEM file holding the public key, for `REKOR_PUBLIC_KEY`
    fn key_file(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(self.public_key_pem().as_bytes()).unwrap();
        file
    }
}

fn b64(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// A two-leaf log whose second leaf is a hashedrekord entry for `ARTIFACT`
struct SignedLog {
    entry: Value,
    log_info: Value,
}

impl SignedLog {
    fn new(log: &TestSigner, signer: &TestSigner, signed_content: &[u8]) -> Self {
        let body = json!({
            "apiVersion": "0.0.1",
            "kind": "hashedrekord",
            "spec": {
                "data": {
                    "hash": {
                        "algorithm": "sha256",
                        "value": Digest::from(sha256(ARTIFACT)).to_hex(),
                    }
                },
                "signature": {
                    "content": b64(&signer.sign(signed_content)),
                    "publicKey": { "content": b64(signer.public_key_pem().as_bytes()) },
                }
            }
        });
        let body_bytes = serde_json::to_vec(&body).unwrap();

        let sibling = hash_leaf(b"earlier entry");
        let root = hash_children(&sibling, &hash_leaf(&body_bytes));
        let checkpoint = log.checkpoint(ORIGIN, 2, &root);

        let entry = json!({
            "0f1e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4c3d2e1f0": {
                "body": b64(&body_bytes),
                "integratedTime": 1700000000,
                "logID": Digest::from(sha256(&log.spki_der())).to_hex(),
                "logIndex": ENTRY_INDEX,
                "verification": {
                    "inclusionProof": {
                        "checkpoint": checkpoint,
                        "hashes": [sibling.to_hex()],
                        "logIndex": 1,
                        "rootHash": root.to_hex(),
                        "treeSize": 2,
                    }
                }
            }
        });
        let log_info = json!({
            "rootHash": root.to_hex(),
            "signedTreeHead": checkpoint,
            "treeID": TREE_ID,
            "treeSize": 2,
        });

        Self { entry, log_info }
    }

    async fn serve(&self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/log"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&self.log_info))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/log/entries"))
            .and(query_param("logIndex", ENTRY_INDEX.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(&self.entry))
            .mount(&server)
            .await;
        server
    }
}

async fn mock_rekor() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/log"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOG_INFO))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/log/proof"))
        .and(query_param("firstSize", "5"))
        .and(query_param("lastSize", "7"))
        .and(query_param("treeID", TREE_ID))
        .respond_with(ResponseTemplate::new(200).set_body_string(CONSISTENCY_PROOF))
        .mount(&server)
        .await;
    server
}

fn context(server: &MockServer, log_key: Option<&NamedTempFile>) -> Context {
    let config = VerifierConfig {
        rekor_url: server.uri(),
        retries: 1,
        public_key_path: log_key.map(|file| file.path().to_path_buf()),
        ..VerifierConfig::default()
    };
    Context::from_config(&config, Some(TREE_ID.to_string()), false).unwrap()
}

fn prev(tree_id: &str, tree_size: u64, root_hex: &str) -> PrevCheckpoint {
    PrevCheckpoint {
        tree_id: tree_id.to_string(),
        tree_size,
        root_hash: Digest::from_hex(root_hex).unwrap(),
    }
}

fn artifact_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

#[tokio::test]
async fn test_checkpoint_command() {
    let server = mock_rekor().await;
    let info = checkpoint::run(&context(&server, None)).await.unwrap();
    assert_eq!(info.tree_size, 7);
    assert_eq!(info.root_hash, ROOT_7);
}

#[tokio::test]
async fn test_checkpoint_command_verifies_signature() {
    let log = TestSigner::generate();
    let server = SignedLog::new(&log, &TestSigner::generate(), ARTIFACT).serve().await;
    let key = log.key_file();

    let info = checkpoint::run(&context(&server, Some(&key))).await.unwrap();
    assert_eq!(info.tree_size, 2);
}

#[tokio::test]
async fn test_checkpoint_command_rejects_unsigned_head() {
    let server = mock_rekor().await;
    let key = TestSigner::generate().key_file();
    let err = checkpoint::run(&context(&server, Some(&key))).await.unwrap_err();
    assert!(format!("{:#}", err).contains("checkpoint signature verification failed"));
}

#[tokio::test]
async fn test_check_signature_rejects_tampered_note() {
    let log = TestSigner::generate();
    let key = log.key_file();
    let server = MockServer::start().await;
    let ctx = context(&server, Some(&key));

    let root = Digest::from_hex(ROOT_7).unwrap();
    let note = log.checkpoint(ORIGIN, 7, &root);
    ctx.check_signature(&Checkpoint::from_text(&note).unwrap())
        .unwrap();

    // Same signature, different tree size in the body
    let tampered = note.replacen("\n7\n", "\n8\n", 1);
    assert!(ctx
        .check_signature(&Checkpoint::from_text(&tampered).unwrap())
        .is_err());

    let unsigned = Checkpoint::new(ORIGIN, 7, root);
    let err = ctx.check_signature(&unsigned).unwrap_err();
    assert!(err.to_string().contains("is not signed"));
}

#[tokio::test]
async fn test_consistency_command_valid() {
    let server = mock_rekor().await;
    let ctx = context(&server, None);
    consistency::run(&ctx, &prev(TREE_ID, 5, ROOT_5)).await.unwrap();
}

#[tokio::test]
async fn test_consistency_command_same_size() {
    let server = mock_rekor().await;
    let ctx = context(&server, None);
    consistency::run(&ctx, &prev(TREE_ID, 7, ROOT_7)).await.unwrap();
    assert!(consistency::run(&ctx, &prev(TREE_ID, 7, ROOT_5)).await.is_err());
}

#[tokio::test]
async fn test_consistency_command_from_empty_tree() {
    // Only the log info endpoint is served
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/log"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOG_INFO))
        .mount(&server)
        .await;
    let ctx = context(&server, None);

    consistency::run(&ctx, &prev(TREE_ID, 0, EMPTY_ROOT))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|request| request.url.path() != "/api/v1/log/proof"));
}

#[rstest]
#[case::wrong_root(TREE_ID, ROOT_7)]
#[case::other_tree("42", ROOT_5)]
#[tokio::test]
async fn test_consistency_command_rejects(#[case] tree_id: &str, #[case] root_hex: &str) {
    let server = mock_rekor().await;
    let ctx = context(&server, None);
    assert!(consistency::run(&ctx, &prev(tree_id, 5, root_hex)).await.is_err());
}

#[tokio::test]
async fn test_inclusion_command_verifies_signed_entry() {
    let log = TestSigner::generate();
    let server = SignedLog::new(&log, &TestSigner::generate(), ARTIFACT).serve().await;
    let key = log.key_file();
    let artifact = artifact_file(ARTIFACT);

    inclusion::run(&context(&server, Some(&key)), ENTRY_INDEX, artifact.path())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_inclusion_command_without_log_key() {
    let log = TestSigner::generate();
    let server = SignedLog::new(&log, &TestSigner::generate(), ARTIFACT).serve().await;
    let artifact = artifact_file(ARTIFACT);

    inclusion::run(&context(&server, None), ENTRY_INDEX, artifact.path())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_inclusion_command_rejects_untrusted_log() {
    let log = TestSigner::generate();
    let server = SignedLog::new(&log, &TestSigner::generate(), ARTIFACT).serve().await;
    let other_key = TestSigner::generate().key_file();
    let artifact = artifact_file(ARTIFACT);

    let err = inclusion::run(&context(&server, Some(&other_key)), ENTRY_INDEX, artifact.path())
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("checkpoint signature verification failed"));
}

#[tokio::test]
async fn test_inclusion_command_rejects_other_artifact() {
    let log = TestSigner::generate();
    let server = SignedLog::new(&log, &TestSigner::generate(), ARTIFACT).serve().await;
    let artifact = artifact_file(b"goodbye\n");

    let err = inclusion::run(&context(&server, None), ENTRY_INDEX, artifact.path())
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("artifact digest mismatch"));
}

#[tokio::test]
async fn test_inclusion_command_rejects_bad_artifact_signature() {
    let log = TestSigner::generate();
    // The entry records the digest of ARTIFACT but signs other content
    let server = SignedLog::new(&log, &TestSigner::generate(), b"goodbye\n").serve().await;
    let artifact = artifact_file(ARTIFACT);

    let err = inclusion::run(&context(&server, None), ENTRY_INDEX, artifact.path())
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("artifact signature verification failed"));
}

#[tokio::test]
async fn test_inclusion_command_missing_artifact_file() {
    let log = TestSigner::generate();
    let server = SignedLog::new(&log, &TestSigner::generate(), ARTIFACT).serve().await;
    let dir = tempfile::tempdir().unwrap();

    let err = inclusion::run(&context(&server, None), ENTRY_INDEX, &dir.path().join("absent"))
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("failed to read artifact"));
}

#[test]
fn test_invalid_log_key_file() {
    let key = artifact_file(b"not a key");
    let config = VerifierConfig {
        public_key_path: Some(key.path().to_path_buf()),
        ..VerifierConfig::default()
    };
    assert!(Context::from_config(&config, None, false).is_err());
}
