//! Shared helpers for API integration tests.
//!
//! Tests drive the fully-layered router from [`build_app_router`] with
//! `tower::ServiceExt::oneshot`; sessions are carried as a raw `Cookie` header.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use campusdesk_api::auth::password::hash_password;
use campusdesk_api::config::{ServerConfig, SessionConfig};
use campusdesk_api::router::build_app_router;
use campusdesk_api::state::AppState;
use campusdesk_db::models::user::{CreateUser, User};
use campusdesk_db::repositories::UserRepo;

pub const COOKIE_NAME: &str = "campusdesk_sid";
pub const PASSWORD: &str = "secret-pass-1";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults writing uploads to `upload_dir`.
pub fn test_config(static_dir: PathBuf, upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            cookie_name: COOKIE_NAME.to_string(),
            ttl_hours: 1,
            cookie_secure: false,
            sweep_interval_secs: 3600,
        },
        static_dir,
        upload_dir,
        max_upload_bytes: 64 * 1024,
        min_password_length: 6,
    }
}

/// Build the full application router with a scratch upload directory.
pub fn build_test_app(pool: PgPool) -> Router {
    let scratch = std::env::temp_dir().join(format!("campusdesk-test-{}", uuid::Uuid::new_v4()));
    build_test_app_with(pool, test_config(scratch.join("public"), scratch.join("uploads")))
}

/// Build the full application router from an explicit configuration.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with [`PASSWORD`] directly in the database.
pub async fn seed_user(pool: &PgPool, username: &str, role: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@school.test"),
        password_hash: hash_password(PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
        firstname: "Test".to_string(),
        lastname: "User".to_string(),
        gender: "female".to_string(),
        phone: "09171234567".to_string(),
        country: "PH".to_string(),
        region: "NCR".to_string(),
        city: "Manila".to_string(),
        brgy: "1".to_string(),
        street: "Main".to_string(),
        dob: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Seed a user, log in through the API and return the `Cookie` header value.
pub async fn signed_in(app: &Router, pool: &PgPool, username: &str, role: &str) -> String {
    seed_user(pool, username, role).await;
    login(app, username, PASSWORD).await
}

/// Log in and return the `name=token` pair for a `Cookie` header.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = send(app, Method::POST, "/login", None, Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    session_cookie(&response).expect("login should set the session cookie")
}

/// Extract `name=value` of the session cookie from a response's `Set-Cookie`.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{COOKIE_NAME}=")))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Poll until `audit_logs` holds `expected` rows; the interceptor writes
/// records from a detached task.
pub async fn wait_for_audit_rows(pool: &PgPool, expected: i64) -> i64 {
    let mut count = 0;
    for _ in 0..50 {
        count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM audit_logs")
            .fetch_one(pool)
            .await
            .unwrap();
        if count >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    count
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send a request with an optional session cookie and optional JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::GET, uri, cookie, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, cookie, Some(body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, uri, cookie, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::DELETE, uri, cookie, None).await
}

/// Send a raw body with the given content type.
pub async fn post_raw(
    app: &Router,
    uri: &str,
    cookie: Option<&str>,
    content_type: &str,
    body: impl Into<Body>,
) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, content_type);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(body.into()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
