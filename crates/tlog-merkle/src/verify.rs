//! Verification entry point
//!
//! [`Verifier`] validates a request up front, dispatches it to the inclusion or
//! consistency algorithm and folds the outcome into a [`VerificationResult`].

use crate::error::{Error, Result};
use crate::proof::{
    check_digest_len, check_path_digests, verify_consistency_proof, verify_inclusion_proof,
};
use crate::tree::LogHasher;
use tlog_types::{Checkpoint, ConsistencyProof, Digest, InclusionProof};

/// Outcome of a verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
}

/// Structured verification outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    verdict: Verdict,
    failure_reason: Option<Error>,
    computed_root: Option<Digest>,
}

impl VerificationResult {
    /// A successful verification that derived `root`
    pub fn valid(root: Digest) -> Self {
        Self {
            verdict: Verdict::Valid,
            failure_reason: None,
            computed_root: Some(root),
        }
    }

    /// A failed verification
    ///
    /// For a root mismatch the calculated root is kept as `computed_root`.
    pub fn invalid(reason: Error) -> Self {
        let computed_root = match &reason {
            Error::RootMismatch { calculated, .. } => Some(calculated.clone()),
            _ => None,
        };
        Self {
            verdict: Verdict::Invalid,
            failure_reason: Some(reason),
            computed_root,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.verdict == Verdict::Valid
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn failure_reason(&self) -> Option<&Error> {
        self.failure_reason.as_ref()
    }

    pub fn computed_root(&self) -> Option<&Digest> {
        self.computed_root.as_ref()
    }

    /// Convert into a `Result` carrying the computed root
    pub fn into_result(self) -> Result<Digest> {
        match (self.failure_reason, self.computed_root) {
            (Some(reason), _) => Err(reason),
            (None, Some(root)) => Ok(root),
            (None, None) => Err(Error::MalformedInput(
                "verification produced no root".to_string(),
            )),
        }
    }
}

impl From<Result<Digest>> for VerificationResult {
    fn from(result: Result<Digest>) -> Self {
        match result {
            Ok(root) => Self::valid(root),
            Err(reason) => Self::invalid(reason),
        }
    }
}

/// A proof together with the checkpoint(s) it claims to match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationRequest {
    Inclusion {
        leaf_hash: Digest,
        proof: InclusionProof,
        checkpoint: Checkpoint,
    },
    Consistency {
        first: Checkpoint,
        second: Checkpoint,
        proof: ConsistencyProof,
    },
}

/// Verifies proofs for a log using a single hash algorithm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verifier {
    hasher: LogHasher,
}

impl Verifier {
    pub fn new(hasher: LogHasher) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &LogHasher {
        &self.hasher
    }

    /// Verify a request
    pub fn verify(&self, request: &VerificationRequest) -> VerificationResult {
        match request {
            VerificationRequest::Inclusion {
                leaf_hash,
                proof,
                checkpoint,
            } => self.verify_inclusion(leaf_hash, proof, checkpoint),
            VerificationRequest::Consistency {
                first,
                second,
                proof,
            } => self.verify_consistency(first, second, proof),
        }
    }

    /// Verify that `leaf_hash` is included in the tree described by `checkpoint`
    pub fn verify_inclusion(
        &self,
        leaf_hash: &Digest,
        proof: &InclusionProof,
        checkpoint: &Checkpoint,
    ) -> VerificationResult {
        let result = self.check_inclusion(leaf_hash, proof, checkpoint);
        match &result {
            Ok(_) => tracing::debug!(
                leaf_index = proof.leaf_index(),
                tree_size = proof.tree_size(),
                "inclusion proof verified"
            ),
            Err(e) => tracing::warn!(
                leaf_index = proof.leaf_index(),
                tree_size = proof.tree_size(),
                error = %e,
                "inclusion proof rejected"
            ),
        }
        result.into()
    }

    /// Verify that `second` is an append-only extension of `first`
    pub fn verify_consistency(
        &self,
        first: &Checkpoint,
        second: &Checkpoint,
        proof: &ConsistencyProof,
    ) -> VerificationResult {
        let result = self.check_consistency(first, second, proof);
        match &result {
            Ok(_) => tracing::debug!(
                first_size = proof.first_size(),
                second_size = proof.second_size(),
                "consistency proof verified"
            ),
            Err(e) => tracing::warn!(
                first_size = proof.first_size(),
                second_size = proof.second_size(),
                error = %e,
                "consistency proof rejected"
            ),
        }
        result.into()
    }

    fn check_inclusion(
        &self,
        leaf_hash: &Digest,
        proof: &InclusionProof,
        checkpoint: &Checkpoint,
    ) -> Result<Digest> {
        check_digest_len(&self.hasher, "leaf hash", leaf_hash)?;
        check_digest_len(&self.hasher, "checkpoint root hash", checkpoint.root_hash())?;
        check_path_digests(&self.hasher, proof.hashes())?;

        if proof.tree_size() != checkpoint.tree_size() {
            return Err(Error::MalformedInput(format!(
                "proof tree size {} does not match checkpoint tree size {}",
                proof.tree_size(),
                checkpoint.tree_size()
            )));
        }

        verify_inclusion_proof(
            &self.hasher,
            leaf_hash,
            proof.leaf_index(),
            proof.tree_size(),
            proof.hashes(),
            checkpoint.root_hash(),
        )
    }

    fn check_consistency(
        &self,
        first: &Checkpoint,
        second: &Checkpoint,
        proof: &ConsistencyProof,
    ) -> Result<Digest> {
        check_digest_len(&self.hasher, "first root hash", first.root_hash())?;
        check_digest_len(&self.hasher, "second root hash", second.root_hash())?;
        check_path_digests(&self.hasher, proof.hashes())?;

        if proof.first_size() != first.tree_size() {
            return Err(Error::MalformedInput(format!(
                "proof first size {} does not match checkpoint tree size {}",
                proof.first_size(),
                first.tree_size()
            )));
        }
        if proof.second_size() != second.tree_size() {
            return Err(Error::MalformedInput(format!(
                "proof second size {} does not match checkpoint tree size {}",
                proof.second_size(),
                second.tree_size()
            )));
        }

        verify_consistency_proof(
            &self.hasher,
            proof.first_size(),
            proof.second_size(),
            proof.hashes(),
            first.root_hash(),
            second.root_hash(),
        )
    }
}
