use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::course::CourseLevel;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub duration: String,
    pub level: Option<CourseLevel>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub course_id: Uuid,
}
