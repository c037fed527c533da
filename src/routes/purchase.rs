use std::sync::Arc;

use crate::controllers::purchase;
use crate::ServiceState;
use axum::routing::{get, post};

pub fn add_routers(router: axum::Router<Arc<ServiceState>>) -> axum::Router<Arc<ServiceState>> {
    router
        .route("/api/purchases", post(purchase::create_purchase))
        .route("/api/purchases/my-purchases", get(purchase::my_purchases))
}
