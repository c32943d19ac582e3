//! Influencer and claim data model
//!
//! JSON field names are camelCase to match the public HTTP contract and the
//! shape the oracle is asked to produce.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verdict attached to a health claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    Verified,
    Questionable,
    Debunked,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Questionable => "Questionable",
            VerificationStatus::Debunked => "Debunked",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single health claim attributed to an influencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthClaim {
    /// Unique within the parent record only
    pub id: String,
    pub text: String,
    pub category: String,
    pub verification_status: VerificationStatus,
    /// 0-100
    pub trust_score: u8,
    /// ISO-8601 timestamp
    pub date: String,
    pub analysis: String,
    /// Free-form citation, may contain a DOI
    pub scientific_reference: String,
}

/// Influencer content as authored in a fixture or produced by the oracle
///
/// The aggregate `trust_score` is supplied directly; it is not derived from
/// the per-claim scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerProfile {
    pub name: String,
    pub bio: String,
    pub category: String,
    pub trust_score: u8,
    pub followers: u64,
    pub yearly_revenue: String,
    pub claims: Vec<HealthClaim>,
}

/// A resolved influencer, as persisted in the store and returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerRecord {
    /// Opaque identifier assigned on first persist
    pub id: String,
    pub name: String,
    /// Lookup key, see [`crate::normalize_name`]
    pub normalized_name: String,
    pub bio: String,
    pub category: String,
    pub trust_score: u8,
    pub followers: u64,
    pub yearly_revenue: String,
    pub claims: Vec<HealthClaim>,
    pub last_updated: DateTime<Utc>,
}

impl InfluencerRecord {
    /// Build a record from profile content, stamped with a new id
    pub fn from_profile(
        profile: InfluencerProfile,
        normalized_name: String,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: profile.name,
            normalized_name,
            bio: profile.bio,
            category: profile.category,
            trust_score: profile.trust_score,
            followers: profile.followers,
            yearly_revenue: profile.yearly_revenue,
            claims: profile.claims,
            last_updated,
        }
    }

    /// Age of the record relative to `now`
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.last_updated)
    }
}

/// Outcome of verifying one ad-hoc claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// `claim_N`, N being the 1-based position in the submitted batch
    pub claim_id: String,
    pub status: VerificationStatus,
    /// 0-100
    pub confidence: u8,
    pub supporting_evidence: String,
    pub journal_references: Vec<String>,
}

/// Claim id for the claim at zero-based `index` of a batch
pub fn claim_id_for(index: usize) -> String {
    format!("claim_{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_claim() -> HealthClaim {
        HealthClaim {
            id: "1".to_string(),
            text: "Morning light helps sleep".to_string(),
            category: "Sleep".to_string(),
            verification_status: VerificationStatus::Verified,
            trust_score: 92,
            date: "2024-02-16T00:00:00.000Z".to_string(),
            analysis: "Well supported".to_string(),
            scientific_reference: "Nature (2023) - DOI: 10.1038/nn.4923".to_string(),
        }
    }

    #[test]
    fn test_claim_serializes_camel_case() {
        let value = serde_json::to_value(sample_claim()).unwrap();
        assert_eq!(value["verificationStatus"], "Verified");
        assert_eq!(value["trustScore"], 92);
        assert_eq!(
            value["scientificReference"],
            "Nature (2023) - DOI: 10.1038/nn.4923"
        );
        assert!(value.get("trust_score").is_none());
    }

    #[test]
    fn test_status_rejects_unknown_variant() {
        let parsed: Result<VerificationStatus, _> = serde_json::from_value(json!("Plausible"));
        assert!(parsed.is_err());

        let parsed: VerificationStatus = serde_json::from_value(json!("Debunked")).unwrap();
        assert_eq!(parsed, VerificationStatus::Debunked);
    }

    #[test]
    fn test_record_from_profile_keeps_content() {
        let profile = InfluencerProfile {
            name: "Jane Doe".to_string(),
            bio: "Dietitian".to_string(),
            category: "Nutrition".to_string(),
            trust_score: 70,
            followers: 1200,
            yearly_revenue: "$10K".to_string(),
            claims: vec![sample_claim()],
        };
        let now = Utc::now();
        let record = InfluencerRecord::from_profile(profile.clone(), "jane doe".to_string(), now);

        assert_eq!(record.name, profile.name);
        assert_eq!(record.normalized_name, "jane doe");
        assert_eq!(record.claims, profile.claims);
        assert_eq!(record.last_updated, now);
        assert!(Uuid::parse_str(&record.id).is_ok());
    }

    #[test]
    fn test_claim_id_is_one_based() {
        assert_eq!(claim_id_for(0), "claim_1");
        assert_eq!(claim_id_for(2), "claim_3");
    }
}
