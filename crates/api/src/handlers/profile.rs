//! Handlers for `/api/profile` and `/api/profile-picture`.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use campusdesk_core::error::CoreError;
use campusdesk_core::validation::{contact_number, date_or_blank, required_text};
use campusdesk_db::models::user::{ProfileResponse, UpdateProfile};
use campusdesk_db::repositories::UserRepo;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::account::load_user;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Multipart field carrying the picture.
const PICTURE_FIELD: &str = "profilePicture";

/// URL prefix under which `UPLOAD_DIR` is served.
const UPLOADS_PREFIX: &str = "/uploads/";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /api/profile`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "required_text"))]
    pub firstname: String,
    #[validate(custom(function = "required_text"))]
    pub lastname: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "contact_number"))]
    pub phone: String,
    #[validate(custom(function = "required_text"))]
    pub gender: String,
    #[serde(deserialize_with = "date_or_blank")]
    pub dob: Option<NaiveDate>,
}

/// Response body for `POST /api/profile-picture`.
#[derive(Debug, Serialize)]
pub struct ProfilePictureResponse {
    pub message: String,
    /// Public URL of the stored picture.
    pub path: String,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// GET /api/profile
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let row = load_user(&state, &user).await?;
    Ok(Json(ProfileResponse::from(&row)))
}

/// PUT /api/profile
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<UpdateProfileRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;
    let changes = UpdateProfile {
        firstname: input.firstname.trim().to_string(),
        lastname: input.lastname.trim().to_string(),
        email: input.email.trim().to_string(),
        phone: input.phone.trim().to_string(),
        gender: input.gender.trim().to_string(),
        dob: input.dob,
    };
    UserRepo::update_profile(&state.pool, user.user_id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;

    tracing::info!(user_id = user.user_id, "Profile updated");
    Ok(Json(MessageResponse::new("Profile updated")))
}

// ---------------------------------------------------------------------------
// Profile picture
// ---------------------------------------------------------------------------

/// POST /api/profile-picture
///
/// Store the uploaded image as `<user_id>-<uuid>.<ext>` and replace any
/// previous picture.
pub async fn upload_picture(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<ProfilePictureResponse>> {
    let max_bytes = state.config.max_upload_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(PICTURE_FIELD) {
            continue;
        }

        let Some(ext) = picture_extension(field.content_type().unwrap_or_default()) else {
            return Err(AppError::BadRequest(
                "Profile picture must be a PNG, JPEG, GIF or WebP image".into(),
            ));
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        if data.is_empty() {
            return Err(AppError::BadRequest("Profile picture is empty".into()));
        }
        if data.len() > max_bytes {
            return Err(AppError::BadRequest(format!(
                "Profile picture must be at most {max_bytes} bytes"
            )));
        }

        let file_name = format!("{}-{}.{ext}", user.user_id, Uuid::new_v4());
        let upload_dir = &state.config.upload_dir;
        tokio::fs::create_dir_all(upload_dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
        tokio::fs::write(upload_dir.join(&file_name), &data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        let public_path = format!("{UPLOADS_PREFIX}{file_name}");
        let previous =
            match UserRepo::set_profile_picture(&state.pool, user.user_id, Some(&public_path))
                .await
            {
                Ok(Some(previous)) => previous,
                Ok(None) => {
                    remove_picture_file(upload_dir, &public_path).await;
                    return Err(AppError::Core(CoreError::NotFound {
                        entity: "User",
                        id: user.user_id,
                    }));
                }
                Err(e) => {
                    remove_picture_file(upload_dir, &public_path).await;
                    return Err(e.into());
                }
            };
        if let Some(old) = previous.as_deref() {
            remove_picture_file(upload_dir, old).await;
        }

        tracing::info!(user_id = user.user_id, path = %public_path, size = data.len(), "Profile picture stored");
        return Ok(Json(ProfilePictureResponse {
            message: "Profile picture updated".to_string(),
            path: public_path,
        }));
    }

    Err(AppError::BadRequest(format!(
        "Missing `{PICTURE_FIELD}` file field"
    )))
}

/// DELETE /api/profile-picture
pub async fn delete_picture(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    let row = load_user(&state, &user).await?;
    let Some(current) = row.profile_picture else {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Profile picture",
            id: user.user_id,
        }));
    };

    UserRepo::set_profile_picture(&state.pool, user.user_id, None).await?;
    remove_picture_file(&state.config.upload_dir, &current).await;

    tracing::info!(user_id = user.user_id, "Profile picture removed");
    Ok(Json(MessageResponse::new("Profile picture removed")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Delete the file behind a `/uploads/<file>` path. Failures are logged only.
pub(crate) async fn remove_picture_file(upload_dir: &Path, public_path: &str) {
    let Some(name) = public_path.strip_prefix(UPLOADS_PREFIX) else {
        tracing::warn!(path = public_path, "Profile picture path outside uploads");
        return;
    };
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        tracing::warn!(path = public_path, "Refusing to remove suspicious upload path");
        return;
    }
    if let Err(e) = tokio::fs::remove_file(upload_dir.join(name)).await {
        tracing::warn!(error = %e, path = public_path, "Failed to remove profile picture");
    }
}

/// Stored extension for an accepted picture type. The client's file name is
/// never consulted since `/uploads` is served from the session's origin.
fn picture_extension(content_type: &str) -> Option<&'static str> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match mime.as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}
