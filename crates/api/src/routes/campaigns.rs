//! Route definitions for the `/campaigns` resource.

use axum::routing::{get, put};
use axum::Router;
use influx_core::sections::{
    AssetCollectionEntry, BillingConfirmationEntry, BudgetReleaseEntry, ContentCoordinationEntry,
    ContentSectionEntry, EmpanelmentEntry, LogisticsTrackingEntry, PoDispatchEntry,
    ProductRequirementEntry,
};

use crate::handlers::campaigns;
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// PUT    /{id}/strategy                 -> update_strategy
/// GET    /{id}/influencers              -> get_influencers
/// PUT    /{id}/influencers              -> set_influencers
/// GET    /{id}/shortlisted              -> get_shortlisted
/// PUT    /{id}/shortlisted              -> set_shortlisted
/// GET    /{id}/approved                 -> get_approved (with finalCosts)
/// PUT    /{id}/approved                 -> set_approved
/// PUT    /{id}/empanelment              -> update_section
/// PUT    /{id}/budget-release           -> update_section
/// PUT    /{id}/po-dispatch              -> update_section
/// PUT    /{id}/final-costs              -> update_final_costs
/// PUT    /{id}/product-requirement      -> update_section
/// PUT    /{id}/content-coordination     -> update_section
/// PUT    /{id}/logistics-tracking       -> update_section
/// PUT    /{id}/content-section          -> update_section
/// PUT    /{id}/asset-collection         -> update_section
/// PUT    /{id}/billing-confirmation     -> update_section
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(campaigns::list).post(campaigns::create))
        .route(
            "/{id}",
            get(campaigns::get_by_id)
                .put(campaigns::update)
                .delete(campaigns::delete),
        )
        .route("/{id}/strategy", put(campaigns::update_strategy))
        .route(
            "/{id}/influencers",
            get(campaigns::get_influencers).put(campaigns::set_influencers),
        )
        .route(
            "/{id}/shortlisted",
            get(campaigns::get_shortlisted).put(campaigns::set_shortlisted),
        )
        .route(
            "/{id}/approved",
            get(campaigns::get_approved).put(campaigns::set_approved),
        )
        .route(
            "/{id}/empanelment",
            put(campaigns::update_section::<EmpanelmentEntry>),
        )
        .route(
            "/{id}/budget-release",
            put(campaigns::update_section::<BudgetReleaseEntry>),
        )
        .route(
            "/{id}/po-dispatch",
            put(campaigns::update_section::<PoDispatchEntry>),
        )
        .route("/{id}/final-costs", put(campaigns::update_final_costs))
        .route(
            "/{id}/product-requirement",
            put(campaigns::update_section::<ProductRequirementEntry>),
        )
        .route(
            "/{id}/content-coordination",
            put(campaigns::update_section::<ContentCoordinationEntry>),
        )
        .route(
            "/{id}/logistics-tracking",
            put(campaigns::update_section::<LogisticsTrackingEntry>),
        )
        .route(
            "/{id}/content-section",
            put(campaigns::update_section::<ContentSectionEntry>),
        )
        .route(
            "/{id}/asset-collection",
            put(campaigns::update_section::<AssetCollectionEntry>),
        )
        .route(
            "/{id}/billing-confirmation",
            put(campaigns::update_section::<BillingConfirmationEntry>),
        )
}
