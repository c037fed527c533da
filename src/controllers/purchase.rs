use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use crate::{
    dto::{
        request::CreatePurchaseRequest,
        response::{PurchaseCreatedResponse, PurchaseListResponse, PurchaseReceipt, PurchaseResponse},
    },
    error::ServiceError,
    repositories,
    services::purchase::purchase_course,
    utils::jwt::UserClaims,
    ServiceState,
};

pub async fn create_purchase(
    State(state): State<Arc<ServiceState>>,
    claims: UserClaims,
    Json(req): Json<CreatePurchaseRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    info!(
        "Received 'create_purchase' request for user ID: {} course ID: {}",
        claims.uid, req.course_id
    );

    let outcome = purchase_course(&state.db, &state.config.rewards, claims.uid, req.course_id)
        .await
        .map_err(|e| e.into_rejection("Purchase failed"))?;

    let response = Json(PurchaseCreatedResponse {
        message: "Purchase successful".to_string(),
        purchase: PurchaseReceipt {
            id: outcome.purchase.id,
            course: outcome.course.title,
            amount: outcome.purchase.amount,
            credits_earned: outcome.purchase.credits_earned,
            is_first_purchase: outcome.purchase.is_first_purchase,
            remaining_coins: outcome.remaining_credits,
        },
    });
    Ok((StatusCode::CREATED, response))
}

pub async fn my_purchases(
    State(state): State<Arc<ServiceState>>,
    claims: UserClaims,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let purchases = repositories::purchase::find_by_user_with_course(&*state.db, claims.uid)
        .await
        .map_err(|e| ServiceError::from(e).into_rejection("Failed to fetch purchases"))?;

    let response = Json(PurchaseListResponse {
        purchases: purchases.into_iter().map(PurchaseResponse::from).collect(),
    })
    .into_response();
    Ok(response)
}
