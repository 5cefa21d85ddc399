//! Handlers for login, signup and logout.
//!
//! These live outside `/api`: they are posted to by the login page and answer
//! with a navigation hint for the browser.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use campusdesk_core::error::CoreError;
use campusdesk_core::validation::{contact_number, date_or_blank, known_role, required_text};
use campusdesk_db::models::session::CreateSession;
use campusdesk_db::models::user::CreateUser;
use campusdesk_db::repositories::{SessionRepo, UserRepo};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{
    hash_password, validate_password_strength, verify_against_dummy, verify_password,
};
use crate::auth::session::{
    expired_session_cookie, generate_session_token, hash_session_token, session_cookie,
    token_from_headers,
};
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::response::RedirectResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /signup`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SignupRequest {
    #[validate(custom(function = "required_text"))]
    pub firstname: String,
    #[validate(custom(function = "required_text"))]
    pub lastname: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "required_text"))]
    pub gender: String,
    #[validate(custom(function = "contact_number"))]
    pub phone: String,
    #[validate(custom(function = "required_text"))]
    pub country: String,
    #[validate(custom(function = "required_text"))]
    pub region: String,
    #[validate(custom(function = "required_text"))]
    pub city: String,
    #[validate(custom(function = "required_text"))]
    pub brgy: String,
    #[validate(custom(function = "required_text"))]
    pub street: String,
    #[validate(custom(function = "known_role"))]
    pub role: String,
    #[serde(deserialize_with = "date_or_blank")]
    pub dob: Option<NaiveDate>,
    #[validate(custom(function = "required_text"))]
    pub username: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn root() -> Redirect {
    Redirect::to("/login")
}

/// POST /login
///
/// Verify credentials, open a session and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<Response> {
    let username = input.username.trim();
    if username.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".into(),
        ));
    }

    let Some(user) = UserRepo::find_by_username(&state.pool, username).await? else {
        verify_against_dummy(&input.password);
        tracing::info!(username, "Login failed: unknown username");
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    let (token, token_hash) = generate_session_token();
    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            token_hash,
            user_id: user.id,
            expires_at: Utc::now() + Duration::hours(state.config.session.ttl_hours),
        },
    )
    .await?;
    let cookie = session_cookie(&state.config.session, &token)?;

    tracing::info!(user_id = user.id, session_id = session.id, "User logged in");

    Ok((
        [(SET_COOKIE, cookie)],
        Json(RedirectResponse {
            message: None,
            redirect: "/dashboard/",
        }),
    )
        .into_response())
}

/// POST /signup
///
/// Register a new account. Does not sign the user in.
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SignupRequest>,
) -> AppResult<Json<RedirectResponse>> {
    input.validate()?;
    validate_password_strength(&input.password, state.config.min_password_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_string(),
            password_hash,
            role: input.role,
            firstname: input.firstname.trim().to_string(),
            lastname: input.lastname.trim().to_string(),
            gender: input.gender.trim().to_string(),
            phone: input.phone.trim().to_string(),
            country: input.country.trim().to_string(),
            region: input.region.trim().to_string(),
            city: input.city.trim().to_string(),
            brgy: input.brgy.trim().to_string(),
            street: input.street.trim().to_string(),
            dob: input.dob,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    Ok(Json(RedirectResponse {
        message: Some("User registered successfully".into()),
        redirect: "/login",
    }))
}

/// GET /logout
///
/// End the current session, if any, and send the browser to the login page.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    if let Some(token) = token_from_headers(&headers, &state.config.session.cookie_name) {
        let ended = SessionRepo::delete_by_token_hash(&state.pool, &hash_session_token(token)).await?;
        if ended {
            tracing::info!("User logged out");
        }
    }
    let cookie = expired_session_cookie(&state.config.session)?;
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/login")).into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}
