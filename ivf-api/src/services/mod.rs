//! Core services: influencer resolution and claim verification

pub mod resolution;
pub mod verification;

pub use resolution::{Resolution, ResolutionEngine, ResolutionSource, ResolveHints};
pub use verification::{ClaimFailure, ClaimOutcome, ClaimVerifier};
