//! Shared response envelope types for API handlers.
//!
//! All JSON responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "emailSent": bool }` for operations that notify by email
/// on a best-effort basis.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifiedResponse<T: Serialize> {
    pub data: T,
    pub email_sent: bool,
}
