use crate::ServiceState;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tracing::warn;
use uuid::Uuid;

pub static DECODE_HEADER: Lazy<Validation> = Lazy::new(Validation::default);
pub static ENCODE_HEADER: Lazy<Header> = Lazy::new(Header::default);

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct UserClaims {
    pub iat: i64,
    pub exp: i64,
    pub uid: Uuid,
}

impl UserClaims {
    pub fn new(duration: Duration, user_id: Uuid) -> Self {
        let now = Utc::now().timestamp();
        let lifetime = i64::try_from(duration.as_secs()).unwrap_or(i64::MAX);
        Self {
            iat: now,
            exp: now.saturating_add(lifetime),
            uid: user_id,
        }
    }

    pub fn decode(token: &str, key: &str) -> Result<TokenData<Self>, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<UserClaims>(
            token,
            &DecodingKey::from_secret(key.as_ref()),
            &DECODE_HEADER,
        )
    }

    pub fn encode(&self, key: &str) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(
            &ENCODE_HEADER,
            self,
            &EncodingKey::from_secret(key.as_ref()),
        )
    }
}

pub fn generate_token(
    state: &ServiceState,
    user_id: Uuid,
) -> Result<String, jsonwebtoken::errors::Error> {
    UserClaims::new(
        Duration::from_secs(state.config.jwt.access_token_expired_date),
        user_id,
    )
    .encode(&state.config.jwt.secret)
}

#[async_trait::async_trait]
impl FromRequestParts<Arc<ServiceState>> for UserClaims {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ServiceState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                (
                    StatusCode::UNAUTHORIZED,
                    "No token, authorization denied".to_string(),
                )
            })?;

        let user_claims = UserClaims::decode(bearer.token(), &state.config.jwt.secret)
            .map_err(|e| {
                warn!("Rejected bearer token: {}", e);
                (StatusCode::UNAUTHORIZED, "Token is not valid".to_string())
            })?
            .claims;

        Ok(user_claims)
    }
}
