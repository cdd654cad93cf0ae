//! Route definitions for the reference catalogs: brands, products and
//! campaign stages.

use axum::routing::get;
use axum::Router;

use crate::handlers::{brands, campaign_stages, products};
use crate::state::AppState;

/// Routes mounted at `/brands`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn brand_router() -> Router<AppState> {
    Router::new()
        .route("/", get(brands::list).post(brands::create))
        .route(
            "/{id}",
            get(brands::get_by_id).put(brands::update).delete(brands::delete),
        )
}

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /  ?brandId=  -> list
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// ```
pub fn product_router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{id}",
            get(products::get_by_id)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Routes mounted at `/campaign-stages`.
///
/// ```text
/// GET    /      -> list (ordered by stageOrder)
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn stage_router() -> Router<AppState> {
    Router::new()
        .route("/", get(campaign_stages::list).post(campaign_stages::create))
        .route(
            "/{id}",
            get(campaign_stages::get_by_id)
                .put(campaign_stages::update)
                .delete(campaign_stages::delete),
        )
}
