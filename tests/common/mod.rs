use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use coinacademy::{client::schema, config::ServiceConfig, routes::create_router, ServiceState};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub db: Arc<DatabaseConnection>,
}

pub async fn spawn_app() -> TestApp {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    schema::bootstrap(&db).await.unwrap();

    let mut config = ServiceConfig::default();
    config.jwt.secret = "integration-secret".to_string();
    config.jwt.access_token_expired_date = 3600;
    config.app.password_hash_cost = 4;

    let db = Arc::new(db);
    let state = Arc::new(ServiceState {
        config: Arc::new(config),
        db: db.clone(),
    });
    TestApp {
        router: create_router(state),
        db,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Option<Value>, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&bytes).to_string();
        (status, serde_json::from_str(&text).ok(), text)
    }

    /// Registers a user and returns the response body.
    pub async fn register(&self, email: &str, referral_code: Option<&str>) -> Value {
        let mut body = serde_json::json!({
            "email": email,
            "password": "password123",
            "name": "Test User",
        });
        if let Some(code) = referral_code {
            body["referralCode"] = Value::String(code.to_string());
        }
        let (status, json, text) = self
            .request(Method::POST, "/api/auth/register", None, Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{text}");
        json.unwrap()
    }

    pub async fn create_course(&self, token: &str, title: &str) -> String {
        let (status, json, text) = self
            .request(
                Method::POST,
                "/api/courses",
                Some(token),
                Some(serde_json::json!({
                    "title": title,
                    "description": "A course",
                    "instructor": "Ferris",
                    "price": 99.99,
                    "duration": "12 hours",
                    "level": "Intermediate",
                    "thumbnail": "https://example.com/t.png",
                    "category": "Programming",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{text}");
        json.unwrap()["course"]["id"].as_str().unwrap().to_string()
    }
}
