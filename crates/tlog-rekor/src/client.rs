//! Rekor client for transparency log operations

use crate::entry::{LogEntry, LogEntryResponse, LogInfo, RekorConsistencyProof};
use crate::error::{Error, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tlog_types::{Checkpoint, ConsistencyProof, InclusionProof};

/// The public Sigstore Rekor instance
pub const PUBLIC_REKOR_URL: &str = "https://rekor.sigstore.dev";

/// Source of checkpoints and proofs for a transparency log
///
/// Everything a log client returns is untrusted until verified.
pub trait LogClient: Send + Sync {
    /// Fetch the latest checkpoint
    fn fetch_checkpoint(&self) -> Pin<Box<dyn Future<Output = Result<Checkpoint>> + Send + '_>>;

    /// Fetch the inclusion proof of an entry against a tree of `tree_size`
    fn fetch_inclusion_proof(
        &self,
        entry_index: u64,
        tree_size: u64,
    ) -> Pin<Box<dyn Future<Output = Result<InclusionProof>> + Send + '_>>;

    /// Fetch the consistency proof between two tree sizes
    fn fetch_consistency_proof(
        &self,
        first_size: u64,
        second_size: u64,
    ) -> Pin<Box<dyn Future<Output = Result<ConsistencyProof>> + Send + '_>>;
}

/// HTTP behaviour of a [`RekorClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// Attempts per request, including the first
    pub retries: u32,
    /// Delay before the second attempt; grows linearly with each attempt
    pub backoff: Duration,
    /// Shard to request consistency proofs from
    pub tree_id: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retries: 3,
            backoff: Duration::from_millis(500),
            tree_id: None,
        }
    }
}

/// A client for the Rekor v1 REST API
pub struct RekorClient {
    /// Base URL of the Rekor instance
    url: String,
    client: reqwest::Client,
    options: ClientOptions,
}

impl RekorClient {
    /// Create a new Rekor client
    pub fn new(url: impl Into<String>, options: ClientOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            url: url.into().trim_end_matches('/').to_string(),
            client,
            options,
        })
    }

    /// Create a client for the public Sigstore Rekor instance
    pub fn public() -> Result<Self> {
        Self::new(PUBLIC_REKOR_URL, ClientOptions::default())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get log info (tree size, root hash, signed tree head)
    pub async fn get_log_info(&self) -> Result<LogInfo> {
        let url = format!("{}/api/v1/log?stable=true", self.url);
        let response = self.send(&url, "log info").await?;
        parse_json(response, "log info").await
    }

    /// Get a log entry by its global index
    pub async fn get_entry_by_index(&self, index: u64) -> Result<LogEntry> {
        let url = format!("{}/api/v1/log/entries?logIndex={}", self.url, index);
        let what = format!("entry at index {}", index);
        let response = self.send(&url, &what).await?;
        let entries: LogEntryResponse = parse_json(response, &what).await?;

        let (uuid, mut entry) = entries
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(what))?;

        entry.uuid = uuid;
        Ok(entry)
    }

    /// Get the consistency proof between two tree sizes
    pub async fn get_consistency_proof(
        &self,
        first_size: u64,
        last_size: u64,
        tree_id: Option<&str>,
    ) -> Result<RekorConsistencyProof> {
        let mut url = format!(
            "{}/api/v1/log/proof?firstSize={}&lastSize={}",
            self.url, first_size, last_size
        );
        if let Some(tree_id) = tree_id {
            url.push_str(&format!("&treeID={}", tree_id));
        }
        let what = format!("consistency proof {} -> {}", first_size, last_size);
        let response = self.send(&url, &what).await?;
        parse_json(response, &what).await
    }

    /// Get the PEM-encoded public key of the log
    pub async fn get_public_key(&self) -> Result<String> {
        let url = format!("{}/api/v1/log/publicKey", self.url);
        let response = self.send(&url, "public key").await?;
        response
            .text()
            .await
            .map_err(|e| Error::Http(e.to_string()))
    }

    /// GET `url`, retrying transport errors and 5xx responses
    async fn send(&self, url: &str, what: &str) -> Result<reqwest::Response> {
        let attempts = self.options.retries.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            if attempt > 1 {
                tokio::time::sleep(self.options.backoff * (attempt - 1)).await;
            }
            tracing::debug!(url, attempt, "fetching {}", what);

            match self.client.get(url).send().await {
                Ok(response) if response.status().is_server_error() => {
                    tracing::warn!(url, attempt, status = %response.status(), "server error");
                    last_error = Some(Error::Api(format!(
                        "failed to get {}: {}",
                        what,
                        response.status()
                    )));
                }
                Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                    return Err(Error::NotFound(what.to_string()));
                }
                Ok(response) if !response.status().is_success() => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::Api(format!(
                        "failed to get {}: {} - {}",
                        what, status, body
                    )));
                }
                Ok(response) => return Ok(response),
                Err(e) => {
                    tracing::warn!(url, attempt, error = %e, "request failed");
                    last_error = Some(Error::Http(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Http(format!("failed to get {}", what))))
    }
}

async fn parse_json<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Http(format!("failed to read {}: {}", what, e)))?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl LogClient for RekorClient {
    fn fetch_checkpoint(&self) -> Pin<Box<dyn Future<Output = Result<Checkpoint>> + Send + '_>> {
        Box::pin(async move { self.get_log_info().await?.to_checkpoint() })
    }

    fn fetch_inclusion_proof(
        &self,
        entry_index: u64,
        tree_size: u64,
    ) -> Pin<Box<dyn Future<Output = Result<InclusionProof>> + Send + '_>> {
        Box::pin(async move {
            let entry = self.get_entry_by_index(entry_index).await?;
            let proof = entry.rekor_inclusion_proof()?.to_inclusion_proof()?;
            // The v1 API only proves against the tree head current at fetch time
            if proof.tree_size() != tree_size {
                return Err(Error::InvalidResponse(format!(
                    "log returned a proof for tree size {}, wanted {}",
                    proof.tree_size(),
                    tree_size
                )));
            }
            Ok(proof)
        })
    }

    fn fetch_consistency_proof(
        &self,
        first_size: u64,
        second_size: u64,
    ) -> Pin<Box<dyn Future<Output = Result<ConsistencyProof>> + Send + '_>> {
        Box::pin(async move {
            self.get_consistency_proof(first_size, second_size, self.options.tree_id.as_deref())
                .await?
                .to_consistency_proof(first_size, second_size)
        })
    }
}
