//! Gate for the server-rendered dashboard pages.

use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use super::auth::AuthUser;
use crate::state::AppState;

/// Send visitors without a live session to the login page (303) instead of
/// serving the dashboard.
pub async fn require_session_page(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(_) => next.run(Request::from_parts(parts, body)).await,
        Err(err) => {
            tracing::debug!(error = %err, path = %parts.uri.path(), "Page requires a session");
            Redirect::to("/login").into_response()
        }
    }
}
