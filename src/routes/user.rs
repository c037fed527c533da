use std::sync::Arc;

use crate::controllers::user;
use crate::ServiceState;
use axum::routing::{get, post};

pub fn add_routers(router: axum::Router<Arc<ServiceState>>) -> axum::Router<Arc<ServiceState>> {
    router
        .route("/api/auth/register", post(user::register))
        .route("/api/auth/login", post(user::login))
        .route("/api/auth/me", get(user::me))
}
