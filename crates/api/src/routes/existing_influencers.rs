//! Route definitions for the `/existing-influencers` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::existing_influencers;
use crate::state::AppState;

/// Routes mounted at `/existing-influencers`.
///
/// ```text
/// POST   /upload          -> upload (multipart xlsx)
/// GET    /                -> list
/// PUT    /bulk-assign     -> bulk_assign
/// GET    /{id}            -> get_by_id
/// DELETE /{id}            -> delete
/// PUT    /{id}/status     -> update_status
/// PUT    /{id}/link-form  -> link_form
/// ```
pub fn router(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(existing_influencers::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/", get(existing_influencers::list))
        .route("/bulk-assign", put(existing_influencers::bulk_assign))
        .route(
            "/{id}",
            get(existing_influencers::get_by_id).delete(existing_influencers::delete),
        )
        .route("/{id}/status", put(existing_influencers::update_status))
        .route("/{id}/link-form", put(existing_influencers::link_form))
}
