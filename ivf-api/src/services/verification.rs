//! Ad-hoc claim verification
//!
//! One oracle call per claim, all in flight at once. [`ClaimVerifier::verify_each`]
//! reports every claim's outcome; [`ClaimVerifier::verify_claims`] fails the
//! whole batch when any claim fails.

use futures::future::join_all;
use ivf_common::models::claim_id_for;
use ivf_common::{Error, Result, VerificationResult};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::oracle::{prompts, schema, ClaimOracle};

/// One claim of a batch could not be verified
#[derive(Debug, Clone, Error)]
#[error("Failed to verify claim {position} ({claim_id}): {reason}")]
pub struct ClaimFailure {
    pub claim_id: String,
    /// 1-based position in the submitted batch
    pub position: usize,
    pub reason: String,
}

pub type ClaimOutcome = std::result::Result<VerificationResult, ClaimFailure>;

pub struct ClaimVerifier {
    oracle: Option<Arc<dyn ClaimOracle>>,
}

impl ClaimVerifier {
    /// `oracle` is `None` when no credential is configured
    pub fn new(oracle: Option<Arc<dyn ClaimOracle>>) -> Self {
        Self { oracle }
    }

    /// Verify every claim, all-or-nothing
    ///
    /// Every oracle call runs to completion; if any claim failed, the first
    /// failure (by position) becomes an [`Error::Upstream`] and no results are
    /// returned.
    pub async fn verify_claims(
        &self,
        claims: &[String],
        journals: &[String],
    ) -> Result<Vec<VerificationResult>> {
        let outcomes = self.verify_each(claims, journals).await?;
        let total = outcomes.len();

        let results = outcomes
            .into_iter()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|failure| {
                warn!(
                    claim_id = %failure.claim_id,
                    total,
                    "Claim batch aborted by failed claim"
                );
                Error::Upstream(failure.to_string())
            })?;

        info!(claims = total, "Claim batch verified");
        Ok(results)
    }

    /// Verify every claim, returning one outcome per claim in input order
    ///
    /// Batch-level problems (no claims, no journals, no oracle) are still
    /// errors and are reported before any oracle call.
    pub async fn verify_each(
        &self,
        claims: &[String],
        journals: &[String],
    ) -> Result<Vec<ClaimOutcome>> {
        validate_batch(claims, journals)?;

        let oracle = self.oracle.as_deref().ok_or_else(|| {
            Error::Config("Oracle API key not configured; claim verification unavailable".to_string())
        })?;

        info!(claims = claims.len(), journals = journals.len(), "Verifying claim batch");

        let calls = claims
            .iter()
            .enumerate()
            .map(|(index, claim)| verify_one(oracle, index, claim, journals));

        Ok(join_all(calls).await)
    }
}

fn validate_batch(claims: &[String], journals: &[String]) -> Result<()> {
    if claims.is_empty() {
        return Err(Error::InvalidInput("At least one claim is required".to_string()));
    }
    if let Some(pos) = claims.iter().position(|c| c.trim().is_empty()) {
        return Err(Error::InvalidInput(format!("Claim {} is empty", pos + 1)));
    }
    if journals.is_empty() {
        return Err(Error::InvalidInput("At least one journal is required".to_string()));
    }
    Ok(())
}

async fn verify_one(
    oracle: &dyn ClaimOracle,
    index: usize,
    claim: &str,
    journals: &[String],
) -> ClaimOutcome {
    let claim_id = claim_id_for(index);
    let failure = |reason: String| ClaimFailure {
        claim_id: claim_id.clone(),
        position: index + 1,
        reason,
    };

    let prompt = prompts::claim_verdict(claim, journals, &claim_id);
    let text = oracle.complete(&prompt).await.map_err(|e| {
        warn!(claim_id = %claim_id, error = %e, "Oracle call failed");
        failure(e.to_string())
    })?;

    let result = schema::decode_verdict(&text, index).map_err(|e| {
        warn!(claim_id = %claim_id, error = %e, "Oracle verdict rejected");
        failure(e.to_string())
    })?;

    info!(
        claim_id = %result.claim_id,
        status = %result.status,
        confidence = result.confidence,
        "Claim verified"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_batch() {
        let claims = vec!["Creatine aids recall".to_string()];
        let journals = vec!["Nutrients".to_string()];

        assert!(validate_batch(&claims, &journals).is_ok());
        assert!(matches!(
            validate_batch(&[], &journals),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            validate_batch(&claims, &[]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            validate_batch(&["ok".to_string(), " ".to_string()], &journals),
            Err(Error::InvalidInput(msg)) if msg.contains("Claim 2")
        ));
    }

    #[tokio::test]
    async fn test_missing_oracle_is_config_error() {
        let verifier = ClaimVerifier::new(None);
        let result = verifier
            .verify_claims(&["Claim".to_string()], &["Science".to_string()])
            .await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_input_checked_before_config() {
        let verifier = ClaimVerifier::new(None);
        let result = verifier.verify_claims(&[], &["Science".to_string()]).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
