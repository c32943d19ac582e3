//! HTTP API handlers for ivf-api

pub mod claims;
pub mod health;
pub mod influencers;
pub mod rate_limit;

pub use claims::claim_routes;
pub use health::health_routes;
pub use influencers::influencer_routes;
