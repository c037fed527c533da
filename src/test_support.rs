//! Fixtures shared by the unit tests: an in-memory SQLite database with the
//! full schema, plus helpers that create users, courses and referrals.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{
    client::schema,
    config::ServiceConfig,
    entity::{
        course::{self, CourseLevel},
        user,
    },
    repositories::{self, course::NewCourse, user::NewUser},
    services::signup::{self, Registration},
    utils::referral_code,
};

pub async fn memory_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // Every pooled connection would get its own empty in-memory database.
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    schema::bootstrap(&db).await.unwrap();
    db
}

pub fn config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.jwt.secret = "test-secret".to_string();
    config.jwt.access_token_expired_date = 3600;
    config.app.password_hash_cost = 4;
    config
}

pub async fn insert_user(db: &DatabaseConnection, email: &str, credits: i64) -> user::Model {
    let code = referral_code::generate();
    repositories::user::save(
        db,
        NewUser {
            email,
            name: "Test User",
            password_hash: "unused",
            referral_code: &code,
            referred_by: None,
            credits,
        },
    )
    .await
    .unwrap()
}

pub async fn insert_course(db: &DatabaseConnection, title: &str) -> course::Model {
    repositories::course::save(
        db,
        NewCourse {
            title: title.to_string(),
            description: format!("All about {title}"),
            instructor: "Ferris".to_string(),
            price: 49.99,
            duration: "10 hours".to_string(),
            level: CourseLevel::Beginner,
            thumbnail: "https://example.com/thumb.png".to_string(),
            category: "Programming".to_string(),
        },
    )
    .await
    .unwrap()
}

/// Signs `email` up through the normal registration flow using `referrer`'s code.
pub async fn refer(db: &DatabaseConnection, referrer: &user::Model, email: &str) -> user::Model {
    signup::register(
        db,
        &config(),
        Registration {
            email: email.to_string(),
            password: "password123".to_string(),
            name: "Friend".to_string(),
            referral_code: Some(referrer.referral_code.clone()),
        },
        referral_code::generate,
    )
    .await
    .unwrap()
    .user
}

/// A referrer (10 coins after the bonus) and a referred friend (6 coins).
pub async fn referred_pair(db: &DatabaseConnection) -> (user::Model, user::Model) {
    let referrer = signup::register(
        db,
        &config(),
        Registration {
            email: "referrer@example.com".to_string(),
            password: "password123".to_string(),
            name: "Referrer".to_string(),
            referral_code: None,
        },
        referral_code::generate,
    )
    .await
    .unwrap()
    .user;
    let friend = refer(db, &referrer, "friend@example.com").await;
    (referrer, friend)
}
