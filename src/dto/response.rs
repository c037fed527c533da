use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    entity::{
        course::{self, CourseLevel},
        purchase,
        referral::ReferralStatus,
        user,
    },
    services::dashboard::{Dashboard, ReferredUser},
};

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Account as shown to its owner. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub referral_code: String,
    pub referred_by: Option<Uuid>,
    pub credits: i64,
    pub has_purchased: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            referral_code: model.referral_code,
            referred_by: model.referred_by,
            credits: model.credits,
            has_purchased: model.has_purchased,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub price: f64,
    pub duration: String,
    pub level: CourseLevel,
    pub thumbnail: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl From<course::Model> for CourseResponse {
    fn from(model: course::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            instructor: model.instructor,
            price: model.price,
            duration: model.duration,
            level: model.level,
            thumbnail: model.thumbnail,
            category: model.category,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseDetailResponse {
    pub course: CourseResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseCreatedResponse {
    pub message: String,
    pub course: CourseResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub id: Uuid,
    pub course: String,
    pub amount: i64,
    pub credits_earned: i64,
    pub is_first_purchase: bool,
    pub remaining_coins: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseCreatedResponse {
    pub message: String,
    pub purchase: PurchaseReceipt,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub id: Uuid,
    pub user: Uuid,
    pub course: Option<CourseResponse>,
    pub amount: i64,
    pub credits_earned: i64,
    pub is_first_purchase: bool,
    pub purchase_date: DateTime<Utc>,
}

impl From<(purchase::Model, Option<course::Model>)> for PurchaseResponse {
    fn from((purchase, course): (purchase::Model, Option<course::Model>)) -> Self {
        Self {
            id: purchase.id,
            user: purchase.user_id,
            course: course.map(CourseResponse::from),
            amount: purchase.amount,
            credits_earned: purchase.credits_earned,
            is_first_purchase: purchase.is_first_purchase,
            purchase_date: purchase.purchase_date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseListResponse {
    pub purchases: Vec<PurchaseResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_referred: usize,
    pub converted_users: usize,
    pub total_credits_earned: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferredUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: ReferralStatus,
    pub has_purchased: bool,
    pub joined_at: DateTime<Utc>,
    pub converted_at: Option<DateTime<Utc>>,
    pub coins_earned_from_purchase: i64,
}

impl From<ReferredUser> for ReferredUserResponse {
    fn from(user: ReferredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            status: user.status,
            has_purchased: user.has_purchased,
            joined_at: user.joined_at,
            converted_at: user.converted_at,
            coins_earned_from_purchase: user.coins_earned_from_purchase,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub referral_code: String,
    pub referral_link: String,
    pub metrics: DashboardMetrics,
    pub referred_users: Vec<ReferredUserResponse>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            referral_code: dashboard.referral_code,
            referral_link: dashboard.referral_link,
            metrics: DashboardMetrics {
                total_referred: dashboard.total_referred,
                converted_users: dashboard.converted_users,
                total_credits_earned: dashboard.total_credits_earned,
            },
            referred_users: dashboard
                .referred_users
                .into_iter()
                .map(ReferredUserResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferrerSummary {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateReferralResponse {
    pub valid: bool,
    pub referrer: ReferrerSummary,
}
