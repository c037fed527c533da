mod common;

use axum::http::{Method, StatusCode};
use coinacademy::{repositories, services::ledger};
use common::spawn_app;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn health_reports_running() {
    let app = spawn_app().await;

    let (status, json, _) = app.request(Method::GET, "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.unwrap()["message"], "API is running...");
}

#[tokio::test]
async fn register_returns_token_and_user_without_password() {
    let app = spawn_app().await;

    let body = app.register("ada@example.com", None).await;

    assert_eq!(body["message"], "User registered successfully");
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["credits"], 2);
    assert_eq!(body["user"]["hasPurchased"], false);
    assert_eq!(body["user"]["referralCode"].as_str().unwrap().len(), 8);
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn duplicate_registration_is_a_bad_request() {
    let app = spawn_app().await;
    app.register("ada@example.com", None).await;

    let (status, _, text) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "ada@example.com", "password": "password123", "name": "Ada"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "User already exists");
}

#[rstest]
#[case("password123", StatusCode::OK)]
#[case("wrong-password", StatusCode::BAD_REQUEST)]
#[tokio::test]
async fn login_checks_the_password(#[case] password: &str, #[case] expected: StatusCode) {
    let app = spawn_app().await;
    app.register("ada@example.com", None).await;

    let (status, json, _) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "ADA@example.com", "password": password})),
        )
        .await;

    assert_eq!(status, expected);
    if expected == StatusCode::OK {
        let json = json.unwrap();
        assert_eq!(json["message"], "Login successful");
        assert!(json["token"].as_str().is_some());
    }
}

#[tokio::test]
async fn login_with_unknown_email_matches_wrong_password() {
    let app = spawn_app().await;

    let (status, _, text) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "ghost@example.com", "password": "password123"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "Invalid credentials");
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let app = spawn_app().await;
    let body = app.register("ada@example.com", None).await;
    let token = body["token"].as_str().unwrap();

    let (status, json, _) = app.request(Method::GET, "/api/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.unwrap()["user"]["email"], "ada@example.com");

    let (status, _, _) = app.request(Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = app
        .request(Method::GET, "/api/auth/me", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn course_catalogue_round_trip() {
    let app = spawn_app().await;
    let token = app.register("ada@example.com", None).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _, _) = app
        .request(Method::POST, "/api/courses", None, Some(json!({"title": "Rust"})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let id = app.create_course(&token, "Rust for Rustaceans").await;

    let (status, json, _) = app.request(Method::GET, "/api/courses", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.unwrap()["courses"].as_array().unwrap().len(), 1);

    let (status, json, _) = app
        .request(Method::GET, &format!("/api/courses/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let course = &json.unwrap()["course"];
    assert_eq!(course["title"], "Rust for Rustaceans");
    assert_eq!(course["level"], "Intermediate");

    let (status, _, _) = app
        .request(
            Method::GET,
            &format!("/api/courses/{}", Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn course_without_title_is_rejected() {
    let app = spawn_app().await;
    let token = app.register("ada@example.com", None).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _, _) = app
        .request(
            Method::POST,
            "/api/courses",
            Some(&token),
            Some(json!({"title": "   ", "price": 10.0})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn referral_code_validation_is_case_insensitive() {
    let app = spawn_app().await;
    let code = app.register("ada@example.com", None).await["user"]["referralCode"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, json, _) = app
        .request(
            Method::GET,
            &format!("/api/referrals/validate/{}", code.to_lowercase()),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["referrer"]["code"], code);

    let (status, _, _) = app
        .request(Method::GET, "/api/referrals/validate/ZZZZZZZZ", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn referral_lifecycle_end_to_end() {
    let app = spawn_app().await;
    let referrer = app.register("referrer@example.com", None).await;
    let referrer_token = referrer["token"].as_str().unwrap().to_string();
    let code = referrer["user"]["referralCode"].as_str().unwrap().to_string();

    let friend = app.register("friend@example.com", Some(&code)).await;
    assert_eq!(friend["user"]["credits"], 6);
    let friend_token = friend["token"].as_str().unwrap().to_string();
    let friend_id: Uuid = friend["user"]["id"].as_str().unwrap().parse().unwrap();

    let course_a = app.create_course(&referrer_token, "Course A").await;
    let course_b = app.create_course(&referrer_token, "Course B").await;

    // 6 coins cannot buy a 10 coin course.
    let (status, _, text) = app
        .request(
            Method::POST,
            "/api/purchases",
            Some(&friend_token),
            Some(json!({"courseId": course_a})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.starts_with("Insufficient coins"));

    ledger::credit(&*app.db, friend_id, 14).await.unwrap();

    let (status, json, text) = app
        .request(
            Method::POST,
            "/api/purchases",
            Some(&friend_token),
            Some(json!({"courseId": course_a})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{text}");
    let receipt = &json.unwrap()["purchase"];
    assert_eq!(receipt["course"], "Course A");
    assert_eq!(receipt["amount"], 10);
    assert_eq!(receipt["creditsEarned"], 0);
    assert_eq!(receipt["isFirstPurchase"], true);
    assert_eq!(receipt["remainingCoins"], 10);

    let (status, _, text) = app
        .request(
            Method::POST,
            "/api/purchases",
            Some(&friend_token),
            Some(json!({"courseId": course_a})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "Course already purchased");

    let (status, _, _) = app
        .request(
            Method::POST,
            "/api/purchases",
            Some(&friend_token),
            Some(json!({"courseId": course_b})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json, _) = app
        .request(
            Method::GET,
            "/api/purchases/my-purchases",
            Some(&friend_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let purchases = json.unwrap()["purchases"].as_array().unwrap().clone();
    assert_eq!(purchases.len(), 2);
    assert_eq!(
        purchases.iter().filter(|p| p["isFirstPurchase"] == true).count(),
        1
    );

    let (status, json, _) = app
        .request(
            Method::GET,
            "/api/referrals/dashboard",
            Some(&referrer_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let dashboard = json.unwrap();
    assert_eq!(dashboard["referralCode"], code);
    assert_eq!(
        dashboard["referralLink"],
        format!("http://localhost:3000/register?r={code}")
    );
    assert_eq!(dashboard["metrics"]["totalReferred"], 1);
    assert_eq!(dashboard["metrics"]["convertedUsers"], 1);
    // 2 initial + 8 signup bonus + 10 conversion bonus, paid once.
    assert_eq!(dashboard["metrics"]["totalCreditsEarned"], 20);
    let referred = &dashboard["referredUsers"][0];
    assert_eq!(referred["email"], "friend@example.com");
    assert_eq!(referred["status"], "converted");
    assert_eq!(referred["hasPurchased"], true);
    assert_eq!(referred["coinsEarnedFromPurchase"], 10);

    let friend_now = repositories::user::find_by_id(&*app.db, friend_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(friend_now.credits, 0);
}

#[tokio::test]
async fn purchase_of_unknown_course_is_not_found() {
    let app = spawn_app().await;
    let token = app.register("ada@example.com", None).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _, text) = app
        .request(
            Method::POST,
            "/api/purchases",
            Some(&token),
            Some(json!({"courseId": Uuid::new_v4()})),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(text, "Course not found");
}
