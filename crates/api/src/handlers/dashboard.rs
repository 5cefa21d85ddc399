use axum::extract::State;
use axum::Json;
use campusdesk_db::models::dashboard::DashboardCounts;
use campusdesk_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/dashboard
pub async fn summary(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DashboardCounts>> {
    Ok(Json(DashboardRepo::counts(&state.pool).await?))
}
