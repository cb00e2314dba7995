#![allow(clippy::unwrap_used)]

use super::*;
use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::mpsc;
use tokio::net::TcpListener;

async fn handle_login(Json(body): Json<Value>) -> axum::response::Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    match (email, password) {
        ("student@example.com", "hunter2") => {
            Json(json!({ "token": "tok-123" })).into_response()
        }
        ("crash@example.com", _) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
        }
        ("empty@example.com", _) => Json(json!({ "ok": true })).into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid email or password" })),
        )
            .into_response(),
    }
}

/// Runs the login server on its own runtime thread so the blocking client can
/// be driven from the test thread.
fn spawn_login_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            let app = Router::new().route(LOGIN_PATH, post(handle_login));
            let _ = axum::serve(listener, app).await;
        });
    });
    let addr = rx.recv().unwrap();
    format!("http://{addr}")
}

#[test]
fn test_login_returns_token() {
    let client = AuthClient::new(&spawn_login_server()).unwrap();
    let token = client.login("student@example.com", "hunter2").unwrap();
    assert_eq!(token, "tok-123");
}

#[test]
fn test_login_reports_server_message() {
    let client = AuthClient::new(&spawn_login_server()).unwrap();
    let err = client.login("student@example.com", "wrong").unwrap_err();
    assert!(matches!(err, AuthError::Rejected(_)));
    assert_eq!(err.to_string(), "Invalid email or password");
}

#[test]
fn test_login_falls_back_without_message() {
    let client = AuthClient::new(&spawn_login_server()).unwrap();
    let err = client.login("crash@example.com", "x").unwrap_err();
    assert_eq!(err.to_string(), FALLBACK_MESSAGE);
}

#[test]
fn test_login_success_without_token_is_malformed() {
    let client = AuthClient::new(&spawn_login_server()).unwrap();
    let err = client.login("empty@example.com", "x").unwrap_err();
    assert!(matches!(err, AuthError::MalformedResponse));
}

#[test]
fn test_login_requires_credentials() {
    let client = AuthClient::new("http://127.0.0.1:9").unwrap();
    assert!(matches!(
        client.login("  ", "pw"),
        Err(AuthError::MissingCredentials)
    ));
    assert!(matches!(
        client.login("a@b.c", ""),
        Err(AuthError::MissingCredentials)
    ));
}

#[test]
fn test_login_url_trims_trailing_slash() {
    let client = AuthClient::new("http://localhost:5000/").unwrap();
    assert_eq!(client.login_url(), "http://localhost:5000/api/auth/login");
}

#[test]
fn test_login_unreachable_server_is_network_error() {
    let client = AuthClient::new("http://127.0.0.1:1").unwrap();
    let err = client.login("student@example.com", "hunter2").unwrap_err();
    assert!(matches!(err, AuthError::Network(_)));
}
