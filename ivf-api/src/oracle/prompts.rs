//! Prompt builders for the two oracle flows

use super::OraclePrompt;

const PROFILE_SYSTEM: &str = "You are a precise JSON generator that analyzes health influencers. \
Focus on extracting multiple evidence-based claims with proper scientific references. \
Output only valid JSON without any additional text or reasoning.";

const VERDICT_SYSTEM: &str = "You are a scientific claim verification system. Analyze health claims \
against scientific literature and provide evidence-based verification. Focus on peer-reviewed \
research and clinical studies. Output only valid JSON without additional text.

Response format requirements:
- status must be exactly \"Verified\", \"Questionable\", or \"Debunked\"
- confidence must be an integer between 0-100
- supportingEvidence should summarize key findings and methodology
- journalReferences must include full paper titles and DOI numbers";

const PROFILE_SHAPE: &str = r#"{
  "name": "full name",
  "bio": "short bio focusing on credentials",
  "category": "main health category",
  "trustScore": integer between 0-100,
  "followers": estimated follower count as an integer,
  "yearlyRevenue": "estimated yearly revenue with $ prefix",
  "claims": [
    {
      "id": "1",
      "text": "specific health claim with quantifiable results if possible",
      "category": "Mental Health | Nutrition | Exercise | Sleep | Wellness",
      "verificationStatus": "Verified" or "Questionable" or "Debunked",
      "trustScore": integer between 0-100,
      "date": "ISO-8601 timestamp of when the claim was made",
      "analysis": "concise scientific analysis with focus on evidence quality",
      "scientificReference": "Journal Name (Year) - Full Paper Title - DOI number"
    }
  ]
}"#;

/// Ask for an influencer profile with attributed health claims
///
/// `time_range` and `claim_count` narrow the request when the caller
/// supplied them.
pub fn influencer_profile(
    name: &str,
    time_range: Option<&str>,
    claim_count: Option<u32>,
) -> OraclePrompt {
    let count = match claim_count {
        Some(n) if n > 0 => format!("Include up to {} significant claims", n),
        _ => "Include at least 3-5 significant claims".to_string(),
    };
    let window = time_range
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!(", made within this time range: {}", t))
        .unwrap_or_default();

    OraclePrompt {
        system: PROFILE_SYSTEM.to_string(),
        user: format!(
            "Analyze {} and output a JSON object with these exact fields (no additional commentary). \
{}{}. Give every claim a distinct id:\n{}",
            name, count, window, PROFILE_SHAPE
        ),
    }
}

/// Ask for a verdict on one claim against the selected journals
pub fn claim_verdict(claim: &str, journals: &[String], claim_id: &str) -> OraclePrompt {
    OraclePrompt {
        system: VERDICT_SYSTEM.to_string(),
        user: format!(
            r#"Verify this health claim: "{}"

Check these specific journals and papers: {}

Return ONLY a JSON object in this exact format:
{{
  "claimId": "{}",
  "status": "Verified" | "Questionable" | "Debunked",
  "confidence": integer between 0-100,
  "supportingEvidence": "detailed analysis with methodology and key findings",
  "journalReferences": [
    "Journal Name (Year) - Full Paper Title - DOI: 10.xxxx/xxxxx"
  ]
}}"#,
            claim,
            journals.join(", "),
            claim_id
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_prompt_defaults() {
        let prompt = influencer_profile("Jane Doe", None, None);
        assert!(prompt.user.starts_with("Analyze Jane Doe"));
        assert!(prompt.user.contains("at least 3-5"));
        assert!(!prompt.user.contains("time range"));
        assert!(prompt.system.contains("JSON"));
    }

    #[test]
    fn test_profile_prompt_uses_hints() {
        let prompt = influencer_profile("Jane Doe", Some("Last Month"), Some(10));
        assert!(prompt.user.contains("up to 10 significant claims"));
        assert!(prompt.user.contains("time range: Last Month"));
    }

    #[test]
    fn test_verdict_prompt_lists_journals() {
        let journals = vec!["Nature".to_string(), "The Lancet".to_string()];
        let prompt = claim_verdict("Sauna lowers blood pressure", &journals, "claim_2");
        assert!(prompt.user.contains("\"Sauna lowers blood pressure\""));
        assert!(prompt.user.contains("Nature, The Lancet"));
        assert!(prompt.user.contains("\"claimId\": \"claim_2\""));
    }
}
