//! Route definitions for negotiated costs.
//!
//! Two routers are provided:
//! - `cost_router()` for per-influencer costs mounted at `/negotiation-cost`
//! - `router()` for the negotiation queue mounted at `/negotiation`

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::negotiation;
use crate::state::AppState;

/// Routes mounted at `/negotiation-cost`.
///
/// ```text
/// POST   /                  -> upsert_cost
/// GET    /{influencer_id}   -> get_cost
/// DELETE /{influencer_id}   -> delete_cost
/// ```
pub fn cost_router() -> Router<AppState> {
    Router::new()
        .route("/", post(negotiation::upsert_cost))
        .route(
            "/{influencer_id}",
            get(negotiation::get_cost).delete(negotiation::delete_cost),
        )
}

/// Routes mounted at `/negotiation`.
///
/// ```text
/// GET / ?status=0|1 -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(negotiation::list))
}
