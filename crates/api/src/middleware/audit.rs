//! Audit interceptor for the `/api` tree.
//!
//! Every successful mutating request (POST, PUT, PATCH, DELETE) by a signed-in
//! user produces one `audit_logs` row. The row is written by a detached task
//! after the response is produced: at most once, never retried, and a failed
//! write is only logged. Failed requests leave no trace.

use axum::body::{to_bytes, Body};
use axum::extract::{FromRequestParts, OriginalUri, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use campusdesk_core::audit::{is_mutating, synthesize_details, AuditPayload};
use campusdesk_db::models::audit::CreateAuditLog;
use campusdesk_db::repositories::AuditLogRepo;
use serde_json::json;

use super::auth::AuthUser;
use crate::state::AppState;

/// Room for multipart boundaries and form fields around an upload.
const BODY_SLACK_BYTES: usize = 64 * 1024;

/// Axum middleware recording mutating requests. Mount with
/// `axum::middleware::from_fn_with_state`.
pub async fn record_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !is_mutating(request.method().as_str()) {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();

    // Anonymous requests are rejected by the handler's extractor; nothing to record.
    let Ok(user) = AuthUser::from_request_parts(&mut parts, &state).await else {
        return next.run(Request::from_parts(parts, body)).await;
    };

    let limit = state.config.max_upload_bytes + BODY_SLACK_BYTES;
    let bytes = match to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(error = %err, "Request body rejected by audit interceptor");
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                axum::Json(json!({
                    "error": "Request body too large",
                    "code": "PAYLOAD_TOO_LARGE",
                })),
            )
                .into_response();
        }
    };

    let method = parts.method.as_str().to_string();
    let path = parts
        .extensions
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());
    let details = describe_body(&method, &path, &parts.headers, &bytes);

    let response = next
        .run(Request::from_parts(parts, Body::from(bytes)))
        .await;

    if response.status().is_success() {
        let entry = CreateAuditLog {
            username: user.username,
            action: method,
            path,
            details,
        };
        let pool = state.pool.clone();
        tokio::spawn(async move {
            if let Err(err) = AuditLogRepo::insert(&pool, &entry).await {
                tracing::warn!(
                    error = %err,
                    action = %entry.action,
                    path = %entry.path,
                    "Failed to write audit record"
                );
            }
        });
    }

    response
}

/// Build the detail text for a request from its buffered body.
fn describe_body(method: &str, path: &str, headers: &HeaderMap, body: &[u8]) -> String {
    if body.is_empty() {
        return synthesize_details(method, path, AuditPayload::Empty);
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("multipart/") {
        return synthesize_details(method, path, AuditPayload::Opaque("multipart"));
    }

    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => synthesize_details(method, path, AuditPayload::Json(&value)),
        Err(_) => synthesize_details(method, path, AuditPayload::Opaque("binary")),
    }
}
