//! Route definitions for the `/audit-log` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Routes mounted at `/api/audit-log`.
///
/// ```text
/// GET    /        -> list     (?filter=, ?action=, ?date=, ?include_archived= admin only)
/// GET    /{id}    -> get      (archived records included)
/// DELETE /{id}    -> archive
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(audit::list))
        .route("/{id}", get(audit::get).delete(audit::archive))
}
