use std::sync::Arc;

use crate::controllers::course;
use crate::ServiceState;
use axum::routing::get;

pub fn add_routers(router: axum::Router<Arc<ServiceState>>) -> axum::Router<Arc<ServiceState>> {
    router
        .route(
            "/api/courses",
            get(course::list_courses).post(course::create_course),
        )
        .route("/api/courses/:id", get(course::get_course))
}
