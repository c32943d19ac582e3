//! Influencer endpoints
//!
//! - `GET /api/influencers`: every stored record, highest trust score first
//! - `POST /api/analyze-influencer`: resolve one influencer by name

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use ivf_common::InfluencerRecord;
use serde::Deserialize;
use tracing::info;

use crate::db::influencers;
use crate::services::ResolveHints;
use crate::{ApiError, ApiResult, AppState};

/// Request payload for POST /api/analyze-influencer
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeInfluencerRequest {
    pub influencer_name: Option<String>,
    /// Free-form window such as "Last Month"; forwarded to the oracle
    pub time_range: Option<String>,
    pub claims_to_analyze: Option<u32>,
}

/// GET /api/influencers
pub async fn list_influencers(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<InfluencerRecord>>> {
    let records = influencers::list_by_trust_score(&state.db).await?;
    Ok(Json(records))
}

/// POST /api/analyze-influencer
///
/// **Request:** `{"influencerName": "...", "timeRange": "...", "claimsToAnalyze": 5}`
/// **Response:** the resolved influencer record
///
/// **Errors:**
/// - 400 Bad Request: malformed body, missing or blank `influencerName`
/// - 500 Internal Server Error: the record could not be persisted
///
/// Oracle failures never surface here; the unknown-influencer record is
/// returned instead.
pub async fn analyze_influencer(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeInfluencerRequest>, JsonRejection>,
) -> ApiResult<Json<InfluencerRecord>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let name = match request.influencer_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            return Err(ApiError::BadRequest(
                "Influencer name is required".to_string(),
            ))
        }
    };

    let hints = ResolveHints {
        time_range: request.time_range,
        claim_count: request.claims_to_analyze,
    };

    // Detached so a client disconnect does not abort the oracle call or the write
    let resolver = state.resolver.clone();
    let resolution = tokio::spawn(async move { resolver.resolve_detailed(&name, &hints).await })
        .await
        .map_err(|e| ApiError::Internal(format!("Resolution task failed: {}", e)))??;

    info!(
        id = %resolution.record.id,
        source = resolution.source.as_str(),
        "Influencer analysis complete"
    );

    Ok(Json(resolution.record))
}

/// Build influencer routes
pub fn influencer_routes() -> Router<AppState> {
    Router::new()
        .route("/api/influencers", get(list_influencers))
        .route("/api/analyze-influencer", post(analyze_influencer))
}
