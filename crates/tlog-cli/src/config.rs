//! Environment configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `REKOR_URL` | `https://rekor.sigstore.dev` |
//! | `REKOR_TIMEOUT_SECS` | `5` |
//! | `REKOR_RETRIES` | `3` |
//! | `REKOR_PUBLIC_KEY` | unset: checkpoint signatures are not checked |
//! | `REKOR_HASH_ALGORITHM` | `SHA2_256` |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tlog_merkle::LogHasher;
use tlog_rekor::client::PUBLIC_REKOR_URL;
use tlog_rekor::ClientOptions;
use tlog_types::HashAlgorithm;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    pub rekor_url: String,
    pub timeout: Duration,
    pub retries: u32,
    /// PEM file holding the log's public key
    pub public_key_path: Option<PathBuf>,
    pub hash_algorithm: HashAlgorithm,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            rekor_url: PUBLIC_REKOR_URL.to_string(),
            timeout: Duration::from_secs(5),
            retries: 3,
            public_key_path: None,
            hash_algorithm: HashAlgorithm::Sha2256,
        }
    }
}

impl VerifierConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let rekor_url = get("REKOR_URL").unwrap_or(defaults.rekor_url);

        let timeout = match get("REKOR_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_positive("REKOR_TIMEOUT_SECS", &v)?),
            None => defaults.timeout,
        };

        let retries = match get("REKOR_RETRIES") {
            Some(v) => {
                let retries = parse_positive("REKOR_RETRIES", &v)?;
                u32::try_from(retries).map_err(|_| invalid("REKOR_RETRIES", &v, "too large"))?
            }
            None => defaults.retries,
        };

        let public_key_path = get("REKOR_PUBLIC_KEY").map(PathBuf::from);

        let hash_algorithm = match get("REKOR_HASH_ALGORITHM") {
            Some(v) => HashAlgorithm::from_str(&v)
                .map_err(|e| invalid("REKOR_HASH_ALGORITHM", &v, &e.to_string()))?,
            None => defaults.hash_algorithm,
        };

        Ok(Self {
            rekor_url,
            timeout,
            retries,
            public_key_path,
            hash_algorithm,
        })
    }

    pub fn client_options(&self, tree_id: Option<String>) -> ClientOptions {
        ClientOptions {
            timeout: self.timeout,
            retries: self.retries,
            tree_id,
            ..ClientOptions::default()
        }
    }

    pub fn hasher(&self) -> LogHasher {
        LogHasher::new(self.hash_algorithm)
    }
}

fn parse_positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid(var, value, "must be at least 1")),
        Ok(n) => Ok(n),
        Err(e) => Err(invalid(var, value, &e.to_string())),
    }
}

fn invalid(var: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
