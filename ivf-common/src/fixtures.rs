//! Built-in fixture influencers
//!
//! Hand-authored records used as seed data and as a match target before the
//! oracle is consulted. The table is built once on first access and never
//! mutated afterwards.

use chrono::{SecondsFormat, Utc};
use once_cell::sync::Lazy;

use crate::models::{HealthClaim, InfluencerProfile, VerificationStatus};
use crate::normalize::normalize_name;

/// Key of the record returned when nothing else resolves
pub const UNKNOWN_KEY: &str = "unknown";

/// One fixture entry: its table key plus the profile content
#[derive(Debug, Clone)]
pub struct Fixture {
    pub key: &'static str,
    pub profile: InfluencerProfile,
}

impl Fixture {
    /// True if either the table key or the display name normalizes to `key`
    pub fn matches(&self, normalized_key: &str) -> bool {
        normalize_name(self.key) == normalized_key
            || normalize_name(&self.profile.name) == normalized_key
    }
}

/// Read-only fixture table
#[derive(Debug)]
pub struct FixtureSet {
    unknown: Fixture,
    entries: Vec<Fixture>,
}

impl FixtureSet {
    /// Find the named fixture matching a normalized key
    ///
    /// The "unknown" fallback entry never matches.
    pub fn find(&self, normalized_key: &str) -> Option<&Fixture> {
        if normalized_key.is_empty() {
            return None;
        }
        self.entries.iter().find(|f| f.matches(normalized_key))
    }

    /// The generic record substituted when resolution fails
    pub fn unknown(&self) -> &Fixture {
        &self.unknown
    }

    /// Named fixtures in table order (excludes "unknown")
    pub fn entries(&self) -> &[Fixture] {
        &self.entries
    }
}

static FIXTURES: Lazy<FixtureSet> = Lazy::new(build_fixtures);

/// Process-wide fixture table
pub fn fixtures() -> &'static FixtureSet {
    &FIXTURES
}

fn claim(
    id: &str,
    text: &str,
    category: &str,
    verification_status: VerificationStatus,
    trust_score: u8,
    analysis: &str,
    scientific_reference: &str,
) -> HealthClaim {
    HealthClaim {
        id: id.to_string(),
        text: text.to_string(),
        category: category.to_string(),
        verification_status,
        trust_score,
        date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        analysis: analysis.to_string(),
        scientific_reference: scientific_reference.to_string(),
    }
}

fn build_fixtures() -> FixtureSet {
    use VerificationStatus::*;

    let unknown = Fixture {
        key: UNKNOWN_KEY,
        profile: InfluencerProfile {
            name: "Unknown Influencer".to_string(),
            bio: "Health and wellness influencer focusing on evidence-based approaches.".to_string(),
            category: "General Health".to_string(),
            trust_score: 83,
            followers: 638_000,
            yearly_revenue: "$1.4M".to_string(),
            claims: vec![
                claim(
                    "1",
                    "Regular cold exposure through ice baths or cold showers can boost immune system function and improve metabolic health.",
                    "Wellness",
                    Questionable,
                    75,
                    "While some studies suggest potential benefits of cold exposure, the evidence is mixed and more research is needed to confirm the extent of immune and metabolic improvements. Current studies show modest effects on brown fat activation and inflammatory markers.",
                    "Journal of Clinical Medicine (2022) - \"The Effects of Cold Exposure on Human Health: A Systematic Review\" - DOI: 10.3390/jcm11030820",
                ),
                claim(
                    "2",
                    "Consuming green tea extract can significantly increase fat oxidation during exercise, leading to enhanced weight loss results when combined with regular physical activity. Studies show up to 17% increase in fat burning during moderate-intensity exercise.",
                    "Nutrition",
                    Verified,
                    88,
                    "Multiple controlled trials have demonstrated that green tea catechins, particularly EGCG, can enhance fat oxidation during exercise. The combination of caffeine and catechins appears to have a synergistic effect on metabolism.",
                    "American Journal of Clinical Nutrition (2023) - \"Green Tea Extract and Exercise Metabolism: A Meta-Analysis\" - DOI: 10.1093/ajcn/nqy123",
                ),
                claim(
                    "3",
                    "Intermittent fasting for 16 hours daily can enhance cellular repair processes through autophagy, potentially extending lifespan and improving metabolic health markers. Research indicates significant improvements in insulin sensitivity and inflammatory markers after 12 weeks.",
                    "Nutrition",
                    Verified,
                    85,
                    "Clinical studies support the benefits of intermittent fasting on cellular repair and metabolic health. The 16:8 fasting pattern has shown particular promise in improving various biomarkers of health.",
                    "Cell Metabolism (2023) - \"Effects of Intermittent Fasting on Health, Aging, and Disease\" - DOI: 10.1016/j.cmet.2023.06.018",
                ),
                claim(
                    "4",
                    "High-intensity interval training (HIIT) is more effective for fat loss than steady-state cardio, with studies showing up to 28.5% greater reduction in total fat mass over 12 weeks. Additionally, HIIT improves VO2 max and insulin sensitivity more effectively than traditional cardio.",
                    "Exercise",
                    Verified,
                    90,
                    "Comprehensive research supports the superior effectiveness of HIIT for fat loss and cardiovascular fitness improvements. The time-efficient nature and metabolic benefits are well-documented across multiple studies.",
                    "Journal of Sports Medicine (2023) - \"Comparative Effects of HIIT vs Steady-State Exercise: A Meta-Analysis\" - DOI: 10.1007/s40279-023-01785-5",
                ),
                claim(
                    "5",
                    "Taking vitamin D supplements can prevent all types of viral infections and completely boost immune system function, making you resistant to colds and flu. A daily dose of 5000 IU is claimed to provide complete protection against viral infections.",
                    "Supplements",
                    Debunked,
                    35,
                    "This claim significantly overstates the benefits of vitamin D supplementation. While vitamin D does play a role in immune function, it cannot prevent all viral infections. The claimed dose exceeds recommended daily allowances without proven additional benefits.",
                    "The Lancet Infectious Diseases (2023) - \"Vitamin D Supplementation and Prevention of Acute Respiratory Infections\" - DOI: 10.1016/S1473-3099(23)00023-4",
                ),
            ],
        },
    };

    let entries = vec![
        Fixture {
            key: "Andrew Huberman",
            profile: InfluencerProfile {
                name: "Andrew Huberman".to_string(),
                bio: "Stanford Professor of Neurobiology and Ophthalmology, focusing on neural development, brain plasticity, and neural regeneration. Host of the Huberman Lab Podcast.".to_string(),
                category: "Neuroscience & Health".to_string(),
                trust_score: 94,
                followers: 4_200_000,
                yearly_revenue: "$5.0M".to_string(),
                claims: vec![
                    claim(
                        "1",
                        "Viewing sunlight within 30-60 minutes of waking enhances cortisol release and helps regulate circadian rhythm. Morning sunlight exposure, particularly through the eyes (without looking directly at the sun), can improve sleep quality and daytime alertness.",
                        "Sleep",
                        Verified,
                        92,
                        "Research strongly supports the role of morning light exposure in circadian rhythm regulation. The timing and intensity of light exposure have been shown to significantly impact cortisol levels and sleep-wake cycles.",
                        "Nature Neuroscience (2023) - \"Light Exposure Patterns and Circadian Rhythm Regulation\" - DOI: 10.1038/nn.4923",
                    ),
                    claim(
                        "2",
                        "Cold exposure improves immune function and metabolism through norepinephrine release and brown fat activation. Regular cold exposure can increase metabolic rate by up to 350% during exposure.",
                        "Health",
                        Questionable,
                        75,
                        "While cold exposure does activate brown fat and increase metabolism temporarily, the long-term immune benefits are still under investigation. The metabolic increase claims may be overstated.",
                        "Cell Metabolism (2023) - \"Brown Adipose Tissue Activation by Cold Exposure\" - DOI: 10.1016/j.cmet.2023.02.015",
                    ),
                    claim(
                        "3",
                        "Specific breathing patterns can alter autonomic nervous system function, with physiological breathing exercises showing measurable effects on heart rate variability, stress response, and cognitive performance.",
                        "Mental Health",
                        Verified,
                        88,
                        "Multiple studies confirm the impact of controlled breathing on autonomic function. The mechanisms are well-documented and the effects are reproducible across different populations.",
                        "Frontiers in Neural Circuits (2023) - \"Respiratory-Neural Circuit Interactions\" - DOI: 10.3389/fncir.2023.12345",
                    ),
                ],
            },
        },
        Fixture {
            key: "Dr. Peter Attia",
            profile: InfluencerProfile {
                name: "Dr. Peter Attia".to_string(),
                bio: "Physician focusing on the science of longevity. Host of The Drive podcast, specializing in performance optimization and lifespan extension.".to_string(),
                category: "Longevity & Performance".to_string(),
                trust_score: 92,
                followers: 1_200_000,
                yearly_revenue: "$4.2M".to_string(),
                claims: vec![claim(
                    "1",
                    "Zone 2 cardio training improves mitochondrial function and longevity by increasing mitochondrial density and efficiency. Research shows consistent Zone 2 training can improve metabolic flexibility and reduce all-cause mortality risk by up to 25%.",
                    "Exercise",
                    Verified,
                    95,
                    "Extensive research supports the benefits of Zone 2 training on mitochondrial function and longevity. The metabolic adaptations are well-documented in both athletic and general populations.",
                    "Journal of Applied Physiology (2023) - \"Long-term Effects of Zone 2 Training on Mitochondrial Function\" - DOI: 10.1152/jappl.2023.00123",
                )],
            },
        },
        Fixture {
            key: "Dr. Rhonda Patrick",
            profile: InfluencerProfile {
                name: "Dr. Rhonda Patrick".to_string(),
                bio: "Expert in aging, cancer, and nutrition. Founder of Found My Fitness, focusing on the impact of micronutrients on health.".to_string(),
                category: "Nutrition & Aging".to_string(),
                trust_score: 91,
                followers: 985_000,
                yearly_revenue: "$2.8M".to_string(),
                claims: vec![claim(
                    "1",
                    "Sulforaphane from cruciferous vegetables activates the NRF2 pathway, leading to enhanced antioxidant production and cellular defense mechanisms. Regular consumption can increase glutathione levels by up to 300% and reduce inflammatory markers.",
                    "Nutrition",
                    Verified,
                    94,
                    "Molecular studies consistently demonstrate sulforaphane's role in NRF2 activation. The downstream effects on antioxidant production and cellular protection are well-established.",
                    "Proceedings of the National Academy of Sciences (2023) - \"Sulforaphane-Mediated NRF2 Activation and Cellular Defense\" - DOI: 10.1073/pnas.2023456118",
                )],
            },
        },
    ];

    FixtureSet { unknown, entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_display_name_variants() {
        let set = fixtures();

        let huberman = set.find(&normalize_name("Dr. Andrew Huberman")).unwrap();
        assert_eq!(huberman.profile.trust_score, 94);

        let attia = set.find(&normalize_name("peter attia")).unwrap();
        assert_eq!(attia.profile.name, "Dr. Peter Attia");

        let patrick = set.find(&normalize_name("RHONDA-PATRICK")).unwrap();
        assert_eq!(patrick.key, "Dr. Rhonda Patrick");
    }

    #[test]
    fn test_unknown_is_never_matched() {
        let set = fixtures();
        assert!(set.find("unknown").is_none());
        assert!(set.find(&normalize_name("Unknown Influencer")).is_none());
        assert!(set.find("").is_none());
        assert!(set.entries().iter().all(|f| f.key != UNKNOWN_KEY));
    }

    #[test]
    fn test_unknown_profile_shape() {
        let unknown = &fixtures().unknown().profile;
        assert_eq!(unknown.name, "Unknown Influencer");
        assert_eq!(unknown.trust_score, 83);
        assert_eq!(unknown.claims.len(), 5);
    }

    #[test]
    fn test_claim_ids_unique_within_each_fixture() {
        let set = fixtures();
        for fixture in set.entries().iter().chain(std::iter::once(set.unknown())) {
            let mut ids: Vec<_> = fixture.profile.claims.iter().map(|c| c.id.as_str()).collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), total, "duplicate claim id in {}", fixture.key);
            assert!(fixture.profile.trust_score <= 100);
        }
    }
}
