use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    dto::{
        request::CreateCourseRequest,
        response::{
            CourseCreatedResponse, CourseDetailResponse, CourseListResponse, CourseResponse,
        },
    },
    entity::course::CourseLevel,
    error::ServiceError,
    repositories::{self, course::NewCourse},
    utils::jwt::UserClaims,
    ServiceState,
};

pub async fn list_courses(
    State(state): State<Arc<ServiceState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let courses = repositories::course::find_all(&*state.db)
        .await
        .map_err(|e| ServiceError::from(e).into_rejection("Failed to fetch courses"))?;

    let response = Json(CourseListResponse {
        courses: courses.into_iter().map(CourseResponse::from).collect(),
    })
    .into_response();
    Ok(response)
}

pub async fn get_course(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let course = repositories::course::find_by_id(&*state.db, id)
        .await
        .map_err(|e| ServiceError::from(e).into_rejection("Failed to fetch course"))?
        .ok_or_else(|| ServiceError::CourseNotFound.into_rejection("Failed to fetch course"))?;

    let response = Json(CourseDetailResponse {
        course: course.into(),
    })
    .into_response();
    Ok(response)
}

pub async fn create_course(
    State(state): State<Arc<ServiceState>>,
    claims: UserClaims,
    Json(req): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    info!(
        "Received 'create_course' request from user ID: {}",
        claims.uid
    );

    if req.title.trim().is_empty() {
        return Err(ServiceError::Validation("Title is required".to_string())
            .into_rejection("Failed to create course"));
    }
    if !req.price.is_finite() || req.price < 0.0 {
        return Err(
            ServiceError::Validation("Price must be a non-negative number".to_string())
                .into_rejection("Failed to create course"),
        );
    }

    let course = repositories::course::save(
        &*state.db,
        NewCourse {
            title: req.title.trim().to_string(),
            description: req.description,
            instructor: req.instructor,
            price: req.price,
            duration: req.duration,
            level: req.level.unwrap_or(CourseLevel::Beginner),
            thumbnail: req.thumbnail,
            category: req.category,
        },
    )
    .await
    .map_err(|e| ServiceError::from(e).into_rejection("Failed to create course"))?;

    info!("Successfully created course ID: {}", course.id);

    let response = Json(CourseCreatedResponse {
        message: "Course created successfully".to_string(),
        course: course.into(),
    });
    Ok((StatusCode::CREATED, response))
}
