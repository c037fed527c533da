use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, warn};

use crate::{
    dto::{
        request::{LoginRequest, RegisterRequest},
        response::{AuthResponse, MeResponse},
    },
    error::ServiceError,
    repositories,
    services::signup::{self, Registration},
    utils::{jwt, password, referral_code},
    ServiceState,
};

pub async fn register(
    State(state): State<Arc<ServiceState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    info!("Received 'register' request for email: {}", req.email);

    let registered = signup::register(
        &state.db,
        &state.config,
        Registration {
            email: req.email,
            password: req.password,
            name: req.name,
            referral_code: req.referral_code,
        },
        referral_code::generate,
    )
    .await
    .map_err(|e| e.into_rejection("Server error"))?;

    let token = jwt::generate_token(&state, registered.user.id).map_err(|e| {
        let error_message = format!("Failed to encode access token: {}", e);
        warn!("{}", error_message);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
    })?;

    info!(
        "Successfully registered user ID: {} (referred: {})",
        registered.user.id,
        registered.referral.is_some()
    );

    let response = Json(AuthResponse {
        message: "User registered successfully".to_string(),
        token,
        user: registered.user.into(),
    });
    Ok((StatusCode::CREATED, response))
}

pub async fn login(
    State(state): State<Arc<ServiceState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let email = signup::normalize_email(&req.email);
    info!("Received 'login' request for email: {}", email);

    let user = repositories::user::find_by_email(&*state.db, &email)
        .await
        .map_err(|e| ServiceError::from(e).into_rejection("Server error"))?;

    // Unknown email and wrong password look the same to the caller.
    let verified = match &user {
        Some(user) => password::verify(&req.password, &user.password_hash).await,
        None => false,
    };
    let user = match user {
        Some(user) if verified => user,
        _ => {
            warn!("Failed login attempt for email: {}", email);
            return Err(ServiceError::InvalidCredentials.into_rejection("Server error"));
        }
    };

    let token = jwt::generate_token(&state, user.id).map_err(|e| {
        let error_message = format!("Failed to encode access token: {}", e);
        warn!("{}", error_message);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
    })?;

    info!("Successfully logged in user ID: {}", user.id);

    let response = Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: user.into(),
    })
    .into_response();
    Ok(response)
}

pub async fn me(
    State(state): State<Arc<ServiceState>>,
    claims: jwt::UserClaims,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    info!("Received 'me' request for user ID: {}", claims.uid);

    let user = repositories::user::find_by_id(&*state.db, claims.uid)
        .await
        .map_err(|e| ServiceError::from(e).into_rejection("Server error"))?
        .ok_or_else(|| ServiceError::UserNotFound.into_rejection("Server error"))?;

    let response = Json(MeResponse { user: user.into() }).into_response();
    Ok(response)
}
