//! Login page, session and signup routes (outside `/api`).

use axum::routing::{get, get_service, post};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::ServerConfig;
use crate::handlers::auth;
use crate::state::AppState;

/// Root-level routes.
///
/// ```text
/// GET  /                 -> 303 /login
/// GET  /login            -> login page (<STATIC_DIR>/login/Login.html)
/// GET  /login/{*asset}   -> login page assets
/// POST /login            -> login
/// POST /signup           -> signup
/// GET  /logout           -> logout, 303 /login
/// ```
pub fn router(config: &ServerConfig) -> Router<AppState> {
    let login_page = ServeFile::new(config.static_dir.join("login").join("Login.html"));

    Router::new()
        .route("/", get(auth::root))
        .route("/login", get_service(login_page).post(auth::login))
        // ServeDir resolves the full request path, so `/login/x.js` maps to
        // `<STATIC_DIR>/login/x.js`.
        .route_service("/login/{*asset}", ServeDir::new(&config.static_dir))
        .route("/signup", post(auth::signup))
        .route("/logout", get(auth::logout))
}
