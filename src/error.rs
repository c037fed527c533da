use axum::http::StatusCode;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("User already exists")]
    DuplicateEmail,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid referral code")]
    InvalidReferralCode,
    #[error("User not found")]
    UserNotFound,
    #[error("Course not found")]
    CourseNotFound,
    #[error("Course already purchased")]
    AlreadyPurchased,
    #[error("Insufficient coins. You need {required} coins to purchase this course.")]
    InsufficientBalance { required: i64 },
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_)
            | ServiceError::DuplicateEmail
            | ServiceError::InvalidCredentials
            | ServiceError::AlreadyPurchased
            | ServiceError::InsufficientBalance { .. } => StatusCode::BAD_REQUEST,
            ServiceError::InvalidReferralCode
            | ServiceError::UserNotFound
            | ServiceError::CourseNotFound => StatusCode::NOT_FOUND,
            ServiceError::Database(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts into the handler rejection. Internal failures are logged with
    /// their cause and reported to the caller as `generic`.
    pub fn into_rejection(self, generic: &str) -> (StatusCode, String) {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{}: {}", generic, self);
            (status, generic.to_string())
        } else {
            (status, self.to_string())
        }
    }
}

pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
