//! Route definitions for the signed-in user's own account and profile.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{account, profile};
use crate::state::AppState;

/// Room for multipart framing around the picture itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/api`.
///
/// ```text
/// GET    /account           -> account::get
/// PUT    /account           -> account::update
/// DELETE /account           -> account::delete
/// GET    /profile           -> profile::get
/// PUT    /profile           -> profile::update
/// POST   /profile-picture   -> profile::upload_picture (multipart `profilePicture`)
/// DELETE /profile-picture   -> profile::delete_picture
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/account",
            get(account::get)
                .put(account::update)
                .delete(account::delete),
        )
        .route("/profile", get(profile::get).put(profile::update))
        .route(
            "/profile-picture",
            post(profile::upload_picture)
                .delete(profile::delete_picture)
                .layer(DefaultBodyLimit::max(
                    max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
                )),
        )
}
