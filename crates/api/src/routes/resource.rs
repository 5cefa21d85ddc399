//! Route definitions shared by every CRUD resource.

use axum::routing::get;
use axum::Router;
use campusdesk_db::resource::Resource;

use crate::handlers::crud;
use crate::state::AppState;

/// Routes mounted at `/api/<resource>`.
///
/// ```text
/// GET    /        -> list   (?filter=)
/// POST   /        -> create
/// GET    /{id}    -> get
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<R>).post(crud::create::<R>))
        .route(
            "/{id}",
            get(crud::get::<R>)
                .put(crud::update::<R>)
                .delete(crud::delete::<R>),
        )
}
