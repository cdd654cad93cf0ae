pub mod auth;
pub mod campaigns;
pub mod catalog;
pub mod existing_influencers;
pub mod health;
pub mod influencers;
pub mod marketing;
pub mod negotiation;
pub mod otp;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                              login (public)
/// /auth/change-password                    change password
/// /auth/me                                 current user
///
/// /users                                   list, create (super admin)
/// /users/{id}                              get, update, delete
///
/// /influencers/onboard                     public onboarding (multipart)
/// /influencers/form-email                  public form invitation
/// /influencers                             list (role-scoped, excludes Barter)
/// /influencers/barter                      Barter listing
/// /influencers/export                      xlsx export
/// /influencers/export/filtered             filtered xlsx export
/// /influencers/{id}                        get, update, delete
/// /influencers/{id}/status                 review status
///
/// /negotiation-cost                        upsert costs
/// /negotiation-cost/{influencer_id}        get, delete
/// /negotiation                             negotiation queue
///
/// /existing-influencers/upload             lead import (multipart xlsx)
/// /existing-influencers                    list (role-scoped)
/// /existing-influencers/bulk-assign        bulk assignment
/// /existing-influencers/{id}               get, delete
/// /existing-influencers/{id}/status        triage status
/// /existing-influencers/{id}/link-form     link onboarded influencer
///
/// /marketing                               list, create (multipart)
/// /marketing/files/{filename}              stored file download
/// /marketing/{id}                          get, update, delete
///
/// /brands, /products, /campaign-stages     catalog CRUD
///
/// /otp/send, /otp/verify                   mobile OTP (public)
///
/// /campaigns                               list, create
/// /campaigns/{id}                          get, update, delete
/// /campaigns/{id}/strategy                 strategy
/// /campaigns/{id}/{influencers|shortlisted|approved}   id lists
/// /campaigns/{id}/<section>                ten per-influencer sections
/// ```
///
/// `upload_limit` caps request bodies on the multipart routes; every other
/// route keeps axum's default limit.
pub fn api_routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/influencers", influencers::router(upload_limit))
        .nest("/negotiation-cost", negotiation::cost_router())
        .nest("/negotiation", negotiation::router())
        .nest("/existing-influencers", existing_influencers::router(upload_limit))
        .nest("/marketing", marketing::router(upload_limit))
        .nest("/brands", catalog::brand_router())
        .nest("/products", catalog::product_router())
        .nest("/campaign-stages", catalog::stage_router())
        .nest("/otp", otp::router())
        .nest("/campaigns", campaigns::router())
}
