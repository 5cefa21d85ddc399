//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use campusdesk_core::error::CoreError;
use campusdesk_core::types::DbId;
use campusdesk_db::repositories::SessionRepo;

use crate::auth::session::{hash_session_token, token_from_headers};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the session cookie.
///
/// Resolution reads the session store on every request, so `username` and
/// `role` are the account's current values. The result is cached in the
/// request extensions; a second extraction in the same request is free.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    /// Role name (`"admin"`, `"staff"` or `"student"`).
    pub role: String,
    pub session_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = token_from_headers(&parts.headers, &state.config.session.cookie_name)
            .ok_or_else(not_authenticated)?;

        let session = SessionRepo::find_active(&state.pool, &hash_session_token(token))
            .await?
            .ok_or_else(not_authenticated)?;

        let user = AuthUser {
            user_id: session.user_id,
            username: session.username,
            role: session.role,
            session_id: session.session_id,
        };
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

fn not_authenticated() -> AppError {
    AppError::Core(CoreError::Unauthorized("Not authenticated".into()))
}
