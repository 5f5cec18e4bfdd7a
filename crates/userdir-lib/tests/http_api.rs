// ============================
// userdir-lib/tests/http_api.rs
// ============================
//! End-to-end tests driving the router through `tower::ServiceExt`.
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tower::ServiceExt;
use userdir_lib::{config::Settings, router::create_router, AppState};

/// Router backed by default settings: the seeded `admin` account holds
/// uid 1.
fn test_app() -> Router {
    let state = Arc::new(AppState::new(Settings::default()).unwrap());
    create_router(state)
}

fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

fn register_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/user-register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_post(uri: &str, username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth(username, password))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn user_request() -> Value {
    json!({
        "username": "user",
        "name": "User Name",
        "birthdate": "1990-01-01T00:00:00",
        "password": "UserPassword123",
    })
}

#[tokio::test]
async fn test_register_user() {
    let app = test_app();

    let response = app
        .oneshot(register_request(json!({
            "username": "newuser",
            "name": "New User",
            "birthdate": "2000-01-01T00:00:00",
            "password": "Password123",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await;
    assert_eq!(data["username"], "newuser");
    assert_eq!(data["name"], "New User");
    assert_eq!(data["role"], "user");
    assert!(data.get("password").is_none());
}

#[tokio::test]
async fn test_register_with_role_field_still_creates_user() {
    let app = test_app();

    // A supplied role is ignored; registrations never escalate.
    let response = app
        .oneshot(register_request(json!({
            "username": "cool",
            "name": "user",
            "birthdate": "1970-01-01T00:00:00",
            "role": "ADMIN",
            "password": "superPassword123",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await;
    assert_eq!(data["username"], "cool");
    assert_eq!(data["role"], "user");
}

#[tokio::test]
async fn test_register_invalid_password() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(register_request(json!({
            "username": "newuser",
            "name": "New User",
            "birthdate": "2000-01-01T00:00:00",
            "password": "short",
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let data = body_json(response).await;
    assert_eq!(data["error"]["message"], "invalid password");

    let response = app
        .oneshot(register_request(json!({
            "username": "newuser2",
            "name": "Another User",
            "birthdate": "1990-05-05T00:00:00",
            "password": "NoDigitsHere",
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_username_taken() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(register_request(user_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(register_request(user_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let data = body_json(response).await;
    assert_eq!(data["error"]["message"], "username is already taken");
}

#[tokio::test]
async fn test_get_user_by_username_and_id() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(register_request(user_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed_post(
            "/user-get?username=user",
            "user",
            "UserPassword123",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await;
    assert_eq!(data["username"], "user");

    let uid = data["uid"].as_u64().unwrap();
    let response = app
        .oneshot(authed_post(
            &format!("/user-get?id={uid}"),
            "user",
            "UserPassword123",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await;
    assert_eq!(data["username"], "user");
}

#[tokio::test]
async fn test_get_user_both_params() {
    let app = test_app();

    app.clone()
        .oneshot(register_request(user_request()))
        .await
        .unwrap();

    let response = app
        .oneshot(authed_post(
            "/user-get?id=1&username=user",
            "user",
            "UserPassword123",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_user_no_params() {
    let app = test_app();

    app.clone()
        .oneshot(register_request(user_request()))
        .await
        .unwrap();

    let response = app
        .oneshot(authed_post("/user-get", "user", "UserPassword123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_username_is_404() {
    let app = test_app();

    app.clone()
        .oneshot(register_request(user_request()))
        .await
        .unwrap();

    let response = app
        .oneshot(authed_post(
            "/user-get?username=doesnotexist",
            "user",
            "UserPassword123",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_user_requires_auth() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/user-get?username=admin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get("www-authenticate").unwrap(),
        "Basic"
    );
}

#[tokio::test]
async fn test_promote_user() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(register_request(json!({
            "username": "normaluser",
            "name": "Normal User",
            "birthdate": "1995-01-01T00:00:00",
            "password": "Password1234",
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let uid = body_json(response).await["uid"].as_u64().unwrap();
    assert_eq!(uid, 2); // uid 1 is the seeded admin

    let response = app
        .clone()
        .oneshot(authed_post(
            &format!("/user-promote?id={uid}"),
            "admin",
            "superSecretAdminPassword123",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await;
    assert_eq!(data["role"], "admin");

    // Promotion is visible through a subsequent lookup.
    let response = app
        .oneshot(authed_post(
            &format!("/user-get?id={uid}"),
            "normaluser",
            "Password1234",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await;
    assert_eq!(data["role"], "admin");
}

#[tokio::test]
async fn test_promote_user_bad_credentials() {
    let app = test_app();

    app.clone()
        .oneshot(register_request(json!({
            "username": "normaluser",
            "name": "Normal User",
            "birthdate": "1995-01-01T00:00:00",
            "password": "Password1234",
        })))
        .await
        .unwrap();

    // Wrong password: 401 before any authorization or registry mutation.
    let response = app
        .oneshot(authed_post("/user-promote?id=1", "normaluser", "Password123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_promote_user_forbidden() {
    let app = test_app();

    app.clone()
        .oneshot(register_request(json!({
            "username": "normaluser",
            "name": "Normal User",
            "birthdate": "1995-01-01T00:00:00",
            "password": "Password1234",
        })))
        .await
        .unwrap();

    // Authenticated but not admin: 403, even against an existing target.
    let response = app
        .clone()
        .oneshot(authed_post("/user-promote?id=1", "normaluser", "Password1234"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Same for a nonexistent target: existence is not leaked to non-admins.
    let response = app
        .oneshot(authed_post(
            "/user-promote?id=999",
            "normaluser",
            "Password1234",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_promote_missing_target_is_404_for_admin() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(authed_post(
            "/user-promote?id=999",
            "admin",
            "superSecretAdminPassword123",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let data = body_json(response).await;
    assert_eq!(data["error"]["message"], "user not found");

    // Unset id behaves like a missing target.
    let response = app
        .oneshot(authed_post(
            "/user-promote",
            "admin",
            "superSecretAdminPassword123",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
