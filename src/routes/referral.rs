use std::sync::Arc;

use crate::controllers::referral;
use crate::ServiceState;
use axum::routing::get;

pub fn add_routers(router: axum::Router<Arc<ServiceState>>) -> axum::Router<Arc<ServiceState>> {
    router
        .route("/api/referrals/dashboard", get(referral::get_dashboard))
        .route("/api/referrals/validate/:code", get(referral::validate_code))
}
