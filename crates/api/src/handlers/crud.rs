//! Generic list/get/create/update/delete handlers for any [`Resource`].
//!
//! Each resource router instantiates these with its row type, e.g.
//! `get(crud::list::<Student>)`. Every operation requires a session.

use axum::extract::State;
use axum::Json;
use campusdesk_core::error::CoreError;
use campusdesk_core::types::DbId;
use campusdesk_db::resource::{Resource, ResourceRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::auth::AuthUser;
use crate::response::{CreatedResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Case-insensitive substring matched against the resource's search columns.
    pub filter: Option<String>,
}

/// GET /api/{resource}
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Json<Vec<R>>> {
    let rows = ResourceRepo::<R>::list(&state.pool, params.filter.as_deref()).await?;
    Ok(Json(rows))
}

/// GET /api/{resource}/{id}
pub async fn get<R: Resource>(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<R>> {
    let row = ResourceRepo::<R>::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(Json(row))
}

/// POST /api/{resource}
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<R::Input>,
) -> AppResult<Json<CreatedResponse>> {
    input.validate()?;
    let id = ResourceRepo::<R>::create(&state.pool, &input).await?;
    tracing::info!(resource = R::TABLE, id, user = %user.username, "Record created");
    Ok(Json(CreatedResponse {
        message: format!("{} added", R::LABEL),
        id,
    }))
}

/// PUT /api/{resource}/{id}
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<R::Input>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;
    if !ResourceRepo::<R>::update(&state.pool, id, &input).await? {
        return Err(not_found::<R>(id));
    }
    tracing::info!(resource = R::TABLE, id, user = %user.username, "Record updated");
    Ok(Json(MessageResponse::new(format!("{} updated", R::LABEL))))
}

/// DELETE /api/{resource}/{id}
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ResourceRepo::<R>::delete(&state.pool, id).await? {
        return Err(not_found::<R>(id));
    }
    tracing::info!(resource = R::TABLE, id, user = %user.username, "Record deleted");
    Ok(Json(MessageResponse::new(format!("{} deleted", R::LABEL))))
}

fn not_found<R: Resource>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::LABEL,
        id,
    })
}
