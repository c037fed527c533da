use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    dto::response::{DashboardResponse, ReferrerSummary, ValidateReferralResponse},
    error::ServiceError,
    repositories,
    services::dashboard,
    utils::jwt::UserClaims,
    ServiceState,
};

pub async fn get_dashboard(
    State(state): State<Arc<ServiceState>>,
    claims: UserClaims,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    info!("Received 'dashboard' request for user ID: {}", claims.uid);

    let view = dashboard::dashboard(&*state.db, &state.config, claims.uid)
        .await
        .map_err(|e| e.into_rejection("Failed to fetch dashboard data"))?;

    let response = Json(DashboardResponse::from(view)).into_response();
    Ok(response)
}

pub async fn validate_code(
    State(state): State<Arc<ServiceState>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let referrer = repositories::user::find_by_referral_code(&*state.db, &code)
        .await
        .map_err(|e| ServiceError::from(e).into_rejection("Failed to validate referral code"))?
        .ok_or_else(|| {
            ServiceError::InvalidReferralCode.into_rejection("Failed to validate referral code")
        })?;

    let response = Json(ValidateReferralResponse {
        valid: true,
        referrer: ReferrerSummary {
            name: referrer.name,
            code: referrer.referral_code,
        },
    })
    .into_response();
    Ok(response)
}
