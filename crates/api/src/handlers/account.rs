//! Handlers for `/api/account`: login identity of the signed-in user.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use campusdesk_core::error::CoreError;
use campusdesk_db::models::user::{AccountResponse, UpdateAccount, User};
use campusdesk_db::repositories::UserRepo;
use serde::Deserialize;
use validator::ValidateEmail;

use crate::auth::session::expired_session_cookie;
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::profile::remove_picture_file;
use crate::middleware::auth::AuthUser;
use crate::response::{MessageResponse, RedirectResponse};
use crate::state::AppState;

/// Request body for `PUT /api/account`. Blank fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateAccountRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// GET /api/account
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<AccountResponse>> {
    let row = load_user(&state, &user).await?;
    Ok(Json(AccountResponse::from(&row)))
}

/// PUT /api/account
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<UpdateAccountRequest>,
) -> AppResult<Json<MessageResponse>> {
    let changes = UpdateAccount {
        username: non_blank(input.username),
        email: non_blank(input.email),
    };
    if changes.username.is_none() && changes.email.is_none() {
        return Err(AppError::BadRequest(
            "Provide a username or email to update".into(),
        ));
    }
    if let Some(email) = &changes.email {
        if !email.validate_email() {
            return Err(AppError::Core(CoreError::Validation(
                "Invalid input: email must be a valid email address".into(),
            )));
        }
    }

    UserRepo::update_account(&state.pool, user.user_id, &changes)
        .await?
        .ok_or_else(|| user_not_found(&user))?;

    tracing::info!(user_id = user.user_id, "Account updated");
    Ok(Json(MessageResponse::new("Account updated")))
}

/// DELETE /api/account
///
/// Removes the profile picture, the user row and (by cascade) every session,
/// then expires the cookie. The steps are not transactional: a picture that
/// fails to delete is only logged.
pub async fn delete(State(state): State<AppState>, user: AuthUser) -> AppResult<Response> {
    let row = load_user(&state, &user).await?;
    if let Some(picture) = row.profile_picture.as_deref() {
        remove_picture_file(&state.config.upload_dir, picture).await;
    }

    if !UserRepo::delete(&state.pool, user.user_id).await? {
        return Err(user_not_found(&user));
    }
    tracing::info!(user_id = user.user_id, "Account deleted");

    let cookie = expired_session_cookie(&state.config.session)?;
    Ok((
        [(SET_COOKIE, cookie)],
        Json(RedirectResponse {
            message: Some("Account deleted".into()),
            redirect: "/login",
        }),
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn load_user(state: &AppState, user: &AuthUser) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| user_not_found(user))
}

fn user_not_found(user: &AuthUser) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "User",
        id: user.user_id,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
