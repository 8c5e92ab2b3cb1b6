//! Integration tests for authentication endpoints

mod common;

use axum::http::StatusCode;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use serde_json::json;

fn register_body(email: &str, password: &str) -> String {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    json!({
        "email": email,
        "password": password,
        "first_name": first_name,
        "last_name": last_name,
    })
    .to_string()
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = common::TestApp::new().await;

    let email = format!("register_test_{}@example.com", uuid::Uuid::new_v4());
    let (status, response) = app
        .post("/api/auth/register", &register_body(&email, "SecurePassword123"))
        .await;

    assert_eq!(status, StatusCode::CREATED);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["email"], email);
    assert_eq!(response["role"], "member");
    // The password hash never leaves the service
    assert!(response.get("password").is_none());
    assert!(response.get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email() {
    let app = common::TestApp::new().await;

    let email = format!("duplicate_{}@example.com", uuid::Uuid::new_v4());
    let body = register_body(&email, "SecurePassword123");

    // First registration should succeed
    let (status, _) = app.post("/api/auth/register", &body).await;
    assert_eq!(status, StatusCode::CREATED);

    // Second registration with same email should fail
    let (status, _) = app.post("/api/auth/register", &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_email_is_case_normalized() {
    let app = common::TestApp::new().await;

    let unique = uuid::Uuid::new_v4();
    let (status, _) = app
        .post(
            "/api/auth/register",
            &register_body(&format!("Mixed_{}@Example.COM", unique), "SecurePassword123"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Same address in different case hits the same account
    let (status, _) = app
        .post(
            "/api/auth/register",
            &register_body(&format!("mixed_{}@example.com", unique), "SecurePassword123"),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_invalid_email() {
    let app = common::TestApp::new().await;

    let (status, _) = app
        .post("/api/auth/register", &register_body("not-an-email", "SecurePassword123"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_short_password() {
    let app = common::TestApp::new().await;

    let email = format!("short_{}@example.com", uuid::Uuid::new_v4());
    let (status, response) = app
        .post("/api/auth/register", &register_body(&email, "short"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"]["field"], "password");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_returns_distinct_token_pair() {
    let app = common::TestApp::new().await;

    let email = format!("login_{}@example.com", uuid::Uuid::new_v4());
    let (status, _) = app
        .post("/api/auth/register", &register_body(&email, "SecurePassword123"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let body = json!({"email": email, "password": "SecurePassword123"});
    let (status, response) = app.post("/api/auth/login", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let access = response["access_token"].as_str().unwrap();
    let refresh = response["refresh_token"].as_str().unwrap();

    assert!(!access.is_empty());
    assert!(!refresh.is_empty());
    assert_ne!(access, refresh);
    assert_eq!(response["token_type"], "Bearer");
    assert_eq!(response["user"]["email"], email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_failures_are_indistinguishable() {
    let app = common::TestApp::new().await;

    let email = format!("enum_{}@example.com", uuid::Uuid::new_v4());
    let (status, _) = app
        .post("/api/auth/register", &register_body(&email, "SecurePassword123"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Wrong password for an existing user
    let body = json!({"email": email, "password": "WrongPassword123"});
    let (wrong_pw_status, wrong_pw_body) = app.post("/api/auth/login", &body.to_string()).await;

    // Unknown email entirely
    let body = json!({
        "email": format!("ghost_{}@example.com", uuid::Uuid::new_v4()),
        "password": "SecurePassword123",
    });
    let (unknown_status, unknown_body) = app.post("/api/auth/login", &body.to_string()).await;

    // Same status, same generic body: no user enumeration
    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_body, unknown_body);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_me_returns_profile() {
    let app = common::TestApp::new().await;
    let (access, _refresh, email) = app.register_and_login().await;

    let (status, response) = app.get_auth("/api/auth/me", &access).await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["email"], email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_refresh_returns_new_access_token() {
    let app = common::TestApp::new().await;
    let (_access, refresh, _email) = app.register_and_login().await;

    let body = json!({"refresh_token": refresh});
    let (status, response) = app.post("/api/auth/refresh", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!response["access_token"].as_str().unwrap().is_empty());
    // No refresh rotation in this design
    assert!(response.get("refresh_token").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_access_token_rejected_as_refresh_token() {
    let app = common::TestApp::new().await;
    let (access, _refresh, _email) = app.register_and_login().await;

    let body = json!({"refresh_token": access});
    let (status, _) = app.post("/api/auth/refresh", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_second_login_invalidates_first_session() {
    let app = common::TestApp::new().await;

    let email = format!("rotate_{}@example.com", uuid::Uuid::new_v4());
    let (status, _) = app
        .post("/api/auth/register", &register_body(&email, "SecurePassword123"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let body = json!({"email": email, "password": "SecurePassword123"}).to_string();

    let (_, first) = app.post("/api/auth/login", &body).await;
    let first: serde_json::Value = serde_json::from_str(&first).unwrap();
    let first_refresh = first["refresh_token"].as_str().unwrap();

    let (_, second) = app.post("/api/auth/login", &body).await;
    let second: serde_json::Value = serde_json::from_str(&second).unwrap();
    let second_refresh = second["refresh_token"].as_str().unwrap();

    // The first session's refresh token was overwritten
    let refresh_body = json!({"refresh_token": first_refresh}).to_string();
    let (status, _) = app.post("/api/auth/refresh", &refresh_body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let refresh_body = json!({"refresh_token": second_refresh}).to_string();
    let (status, _) = app.post("/api/auth/refresh", &refresh_body).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_full_session_lifecycle() {
    let app = common::TestApp::new().await;
    let (access, refresh, email) = app.register_and_login().await;

    // Profile works while the session is live
    let (status, response) = app.get_auth("/api/auth/me", &access).await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["email"], email);

    // Logout drops the session
    let (status, _) = app.post_auth("/api/auth/logout", &access, "{}").await;
    assert_eq!(status, StatusCode::OK);

    // The refresh token still has a valid signature, but is revoked
    let body = json!({"refresh_token": refresh});
    let (status, _) = app.post("/api/auth/refresh", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
