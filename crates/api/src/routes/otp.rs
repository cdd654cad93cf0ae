//! Route definitions for the `/otp` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::otp;
use crate::state::AppState;

/// Routes mounted at `/otp` (public).
///
/// ```text
/// POST /send    -> send
/// POST /verify  -> verify
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(otp::send))
        .route("/verify", post(otp::verify))
}
