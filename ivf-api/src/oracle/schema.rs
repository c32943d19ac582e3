//! Typed decoding of oracle output
//!
//! Oracle text must be a single JSON object matching the declared shape.
//! Missing or mistyped fields reject; there are no defaults. Scores must lie
//! in 0-100.

use ivf_common::models::claim_id_for;
use ivf_common::{InfluencerProfile, VerificationResult, VerificationStatus};
use serde::Deserialize;
use thiserror::Error;

/// Oracle output did not match the expected schema
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid JSON for expected schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field `{field}` out of range: {value} (expected 0-100)")]
    OutOfRange { field: String, value: u8 },

    #[error("field `{0}` must not be blank")]
    Blank(&'static str),

    /// Larger than the store's signed 64-bit column
    #[error("field `followers` too large: {0}")]
    FollowersOverflow(u64),
}

impl From<SchemaError> for ivf_common::Error {
    fn from(err: SchemaError) -> Self {
        ivf_common::Error::Upstream(format!("oracle response rejected: {}", err))
    }
}

const MAX_SCORE: u8 = 100;

fn check_score(field: String, value: u8) -> Result<(), SchemaError> {
    if value > MAX_SCORE {
        return Err(SchemaError::OutOfRange { field, value });
    }
    Ok(())
}

/// Decode an influencer profile produced by the oracle
pub fn decode_profile(text: &str) -> Result<InfluencerProfile, SchemaError> {
    let profile: InfluencerProfile = serde_json::from_str(text.trim())?;

    if profile.name.trim().is_empty() {
        return Err(SchemaError::Blank("name"));
    }
    if profile.category.trim().is_empty() {
        return Err(SchemaError::Blank("category"));
    }

    if i64::try_from(profile.followers).is_err() {
        return Err(SchemaError::FollowersOverflow(profile.followers));
    }

    check_score("trustScore".to_string(), profile.trust_score)?;
    for (i, claim) in profile.claims.iter().enumerate() {
        check_score(format!("claims[{}].trustScore", i), claim.trust_score)?;
    }

    Ok(profile)
}

/// Shape of a single claim verdict; `claimId` is assigned locally
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OracleVerdict {
    status: VerificationStatus,
    confidence: u8,
    supporting_evidence: String,
    journal_references: Vec<String>,
}

/// Decode a claim verdict for the claim at zero-based `index`
pub fn decode_verdict(text: &str, index: usize) -> Result<VerificationResult, SchemaError> {
    let verdict: OracleVerdict = serde_json::from_str(text.trim())?;

    check_score("confidence".to_string(), verdict.confidence)?;

    Ok(VerificationResult {
        claim_id: claim_id_for(index),
        status: verdict.status,
        confidence: verdict.confidence,
        supporting_evidence: verdict.supporting_evidence,
        journal_references: verdict.journal_references,
    })
}
