//! Handlers for `/api/audit-log`.
//!
//! Records are created only by the audit interceptor. Deleting one archives
//! it; archived records stay retrievable by id.

use axum::extract::State;
use axum::Json;
use campusdesk_core::error::CoreError;
use campusdesk_core::types::DbId;
use campusdesk_db::models::audit::{AuditLog, AuditQuery};
use campusdesk_db::repositories::AuditLogRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/audit-log
///
/// Newest first. `include_archived=true` is reserved for administrators.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(params): ApiQuery<AuditQuery>,
) -> AppResult<Json<Vec<AuditLog>>> {
    if params.include_archived {
        RequireAdmin::check(user)?;
    }
    let rows = AuditLogRepo::list(&state.pool, &params).await?;
    Ok(Json(rows))
}

/// GET /api/audit-log/{id}
pub async fn get(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<AuditLog>> {
    let row = AuditLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Audit log",
            id,
        }))?;
    Ok(Json(row))
}

/// DELETE /api/audit-log/{id}
pub async fn archive(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !AuditLogRepo::archive(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Audit log",
            id,
        }));
    }
    tracing::info!(id, user = %user.username, "Audit log archived");
    Ok(Json(MessageResponse::new("Audit log archived")))
}
