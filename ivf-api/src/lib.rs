//! ivf-api library interface
//!
//! Exposes the router and services for the binary and for integration tests.

pub mod api;
pub mod db;
pub mod error;
pub mod oracle;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use chrono::{DateTime, Utc};
use ivf_common::config::TomlConfig;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api::rate_limit::{self, IpRateLimiter};
use crate::oracle::ClaimOracle;
use crate::services::{ClaimVerifier, ResolutionEngine};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Influencer store
    pub db: SqlitePool,
    pub resolver: Arc<ResolutionEngine>,
    pub verifier: Arc<ClaimVerifier>,
    /// Per-client-IP inbound limiter
    pub rate_limiter: Arc<IpRateLimiter>,
    /// Origins allowed by the CORS policy
    pub cors_origins: Arc<Vec<String>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// `oracle` is `None` when no credential is configured; resolution then
    /// stops at fixtures and verification reports a configuration error.
    pub fn new(
        db: SqlitePool,
        oracle: Option<Arc<dyn ClaimOracle>>,
        config: &TomlConfig,
    ) -> ivf_common::Result<Self> {
        let rate_limiter = rate_limit::build_rate_limiter(&config.rate_limit)?;

        Ok(Self {
            resolver: Arc::new(ResolutionEngine::new(db.clone(), oracle.clone())),
            verifier: Arc::new(ClaimVerifier::new(oracle)),
            db,
            rate_limiter: Arc::new(rate_limiter),
            cors_origins: Arc::new(config.cors.allowed_origins.clone()),
            startup_time: Utc::now(),
        })
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);
    let limiter = state.rate_limiter.clone();

    Router::new()
        .merge(api::influencer_routes())
        .merge(api::claim_routes())
        .merge(api::health_routes())
        .layer(axum::middleware::from_fn_with_state(
            limiter,
            rate_limit::enforce_rate_limit,
        ))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
