//! Route definitions for the `/influencers` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::influencers;
use crate::state::AppState;

/// Routes mounted at `/influencers`.
///
/// ```text
/// POST   /onboard          -> onboard (public, multipart)
/// POST   /form-email       -> send_form_email (public)
/// GET    /                 -> list
/// GET    /barter           -> list_barter
/// GET    /export           -> export_all (xlsx)
/// GET    /export/filtered  -> export_filtered (xlsx)
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// PUT    /{id}/status      -> update_status
/// ```
pub fn router(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/onboard",
            post(influencers::onboard).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/form-email", post(influencers::send_form_email))
        .route("/", get(influencers::list))
        .route("/barter", get(influencers::list_barter))
        .route("/export", get(influencers::export_all))
        .route("/export/filtered", get(influencers::export_filtered))
        .route(
            "/{id}",
            get(influencers::get_by_id)
                .put(influencers::update)
                .delete(influencers::delete),
        )
        .route("/{id}/status", put(influencers::update_status))
}
