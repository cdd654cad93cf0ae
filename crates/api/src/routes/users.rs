//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /      -> list (super admin)
/// POST   /      -> create (super admin)
/// GET    /{id}  -> get_by_id (self or super admin)
/// PUT    /{id}  -> update (self or super admin)
/// DELETE /{id}  -> delete (super admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/{id}",
            get(users::get_by_id).put(users::update).delete(users::delete),
        )
}
