//! Claim verification endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use ivf_common::VerificationResult;
use serde::Deserialize;

use crate::{ApiError, ApiResult, AppState};

/// Request payload for POST /api/verify-claims
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyClaimsRequest {
    pub claims: Option<Vec<String>>,
    pub journals: Option<Vec<String>>,
}

/// POST /api/verify-claims
///
/// **Request:** `{"claims": ["..."], "journals": ["..."]}`
/// **Response:** one verification result per claim, in input order
///
/// **Errors:**
/// - 400 Bad Request: malformed body, empty claims or journals
/// - 500 Internal Server Error: oracle credential not configured
/// - 502 Bad Gateway: any single claim failed; no partial results
pub async fn verify_claims(
    State(state): State<AppState>,
    payload: Result<Json<VerifyClaimsRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<VerificationResult>>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let claims = request.claims.unwrap_or_default();
    let journals = request.journals.unwrap_or_default();

    let verifier = state.verifier.clone();
    let results = tokio::spawn(async move { verifier.verify_claims(&claims, &journals).await })
        .await
        .map_err(|e| ApiError::Internal(format!("Verification task failed: {}", e)))??;

    Ok(Json(results))
}

/// Build claim routes
pub fn claim_routes() -> Router<AppState> {
    Router::new().route("/api/verify-claims", post(verify_claims))
}
