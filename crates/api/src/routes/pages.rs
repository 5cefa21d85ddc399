//! Static dashboard pages and uploaded files.

use axum::Router;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::middleware::pages::require_session_page;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// /dashboard/...   <STATIC_DIR>/dashboard (session required, else 303 /login)
/// /uploads/...     <UPLOAD_DIR>
/// ```
pub fn router(state: AppState, config: &ServerConfig) -> Router<AppState> {
    let dashboard = Router::new()
        .nest_service(
            "/dashboard",
            ServeDir::new(config.static_dir.join("dashboard")),
        )
        .layer(axum::middleware::from_fn_with_state(
            state,
            require_session_page,
        ));

    Router::new()
        .merge(dashboard)
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
}
