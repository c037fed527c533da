pub mod course;
pub mod purchase;
pub mod referral;
pub mod user;
use std::sync::Arc;

use crate::{dto::response::MessageResponse, ServiceState};
use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub fn create_router(state: Arc<ServiceState>) -> Router {
    let router = Router::new().route("/", get(health));
    let router = user::add_routers(router);
    let router = course::add_routers(router);
    let router = purchase::add_routers(router);
    let router = referral::add_routers(router);

    router
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
}

async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "API is running...".to_string(),
    })
}
