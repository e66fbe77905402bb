//! Integration tests for the HTTP surface.
//!
//! Drives the full router with `tower::ServiceExt::oneshot`, the same way a
//! browser test drives the page.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use carllm_session::adapters::auth::{FirebaseConfig, FirebaseIdentityProvider, SessionStore};
use carllm_session::adapters::http::app_router;
use carllm_session::application::{AppShell, SessionFacade};
use carllm_session::config::ServerConfig;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn simulated_app() -> Router {
    let shell = Arc::new(AppShell::new(SessionFacade::simulated(Arc::new(
        SessionStore::new(),
    ))));
    app_router(shell, &ServerConfig::default())
}

fn delegated_app() -> Router {
    // Never contacted: no request below carries an ID token.
    let provider = FirebaseIdentityProvider::new(
        FirebaseConfig::new("AIza-test").with_emulator_host("127.0.0.1:9"),
    )
    .unwrap();
    let shell = Arc::new(AppShell::new(SessionFacade::delegated(Arc::new(provider))));
    app_router(shell, &ServerConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// =============================================================================
// Simulated mode
// =============================================================================

#[tokio::test]
async fn landing_screen_before_login() {
    let app = simulated_app();

    let (status, screen) = send(&app, "GET", "/api/screen", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        screen["heading"],
        "Turn symptoms into clear repair guidance in minutes."
    );
    assert_eq!(screen["buttons"], json!(["Log in with Google"]));
    assert_eq!(screen["links"], json!(["How It Works"]));
}

#[tokio::test]
async fn sign_in_then_sign_out_round_trip() {
    let app = simulated_app();

    let (status, body) = send(&app, "POST", "/api/auth/sign-in", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "user": {
                "uid": "e2e-user",
                "displayName": "E2E User",
                "email": "e2e@example.com"
            }
        })
    );

    let (_, screen) = send(&app, "GET", "/api/screen", None).await;
    assert_eq!(screen["heading"], "Dashboard");
    assert_eq!(screen["buttons"], json!(["Log out"]));

    let (status, _) = send(&app, "POST", "/api/auth/sign-out", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, state) = send(&app, "GET", "/api/auth/state", None).await;
    assert_eq!(state, json!({ "user": null }));

    let (_, screen) = send(&app, "GET", "/api/screen", None).await;
    assert_eq!(
        screen["heading"],
        "Turn symptoms into clear repair guidance in minutes."
    );
}

#[tokio::test]
async fn bodyless_sign_in_uses_default_selector() {
    let app = simulated_app();

    let (status, body) = send(&app, "POST", "/api/auth/sign-in", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["uid"], "e2e-user");
}

#[tokio::test]
async fn malformed_sign_in_body_is_bad_request() {
    let app = simulated_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/sign-in")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (_, state) = send(&app, "GET", "/api/auth/state", None).await;
    assert_eq!(state, json!({ "user": null }));
}

#[tokio::test]
async fn chat_progress_hooks_drive_status_indicator() {
    let app = simulated_app();
    send(&app, "POST", "/api/auth/sign-in", Some(json!({}))).await;

    let (status, _) = send(&app, "POST", "/__e2e/view", Some(json!({ "name": "chat" }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        "POST",
        "/__e2e/chat-progress",
        Some(json!({ "awaiting": true, "tokens": 12 })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, screen) = send(&app, "GET", "/api/screen", None).await;
    assert_eq!(screen["status"]["text"], "Working on it…");
    assert_eq!(screen["status"]["tokenCounter"], "12 total tokens");
    assert_eq!(screen["status"]["spinner"], true);

    send(
        &app,
        "POST",
        "/__e2e/chat-progress",
        Some(json!({ "awaiting": false, "tokens": 52 })),
    )
    .await;
    let (_, screen) = send(&app, "GET", "/api/screen", None).await;
    assert_eq!(screen["status"], Value::Null);
}

#[tokio::test]
async fn unknown_view_is_bad_request() {
    let app = simulated_app();

    let (status, body) = send(&app, "POST", "/__e2e/view", Some(json!({ "name": "garage" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

// =============================================================================
// Delegated mode
// =============================================================================

#[tokio::test]
async fn hooks_are_absent_when_delegating() {
    let app = delegated_app();

    let (status, _) = send(&app, "POST", "/__e2e/view", Some(json!({ "name": "chat" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delegated_sign_in_without_token_is_unauthorized() {
    let app = delegated_app();

    let (status, body) = send(&app, "POST", "/api/auth/sign-in", Some(json!({}))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_ERROR");

    let (_, state) = send(&app, "GET", "/api/auth/state", None).await;
    assert_eq!(state, json!({ "user": null }));
}
