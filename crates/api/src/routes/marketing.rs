//! Route definitions for the `/marketing` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::marketing;
use crate::state::AppState;

/// Routes mounted at `/marketing`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create (multipart)
/// GET    /files/{filename}   -> download_file
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update (multipart)
/// DELETE /{id}               -> delete
/// ```
pub fn router(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(marketing::list)
                .merge(post(marketing::create).layer(DefaultBodyLimit::max(upload_limit))),
        )
        .route("/files/{filename}", get(marketing::download_file))
        .route(
            "/{id}",
            get(marketing::get_by_id)
                .merge(put(marketing::update).layer(DefaultBodyLimit::max(upload_limit)))
                .delete(marketing::delete),
        )
}
