//! # Influencer Verifier Common Library
//!
//! Shared code for the influencer verifier service:
//! - Influencer and claim data model
//! - Name normalization (the store's lookup key)
//! - Built-in fixture influencers
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod normalize;

pub use error::{Error, Result};
pub use models::{HealthClaim, InfluencerProfile, InfluencerRecord, VerificationResult, VerificationStatus};
pub use normalize::normalize_name;
