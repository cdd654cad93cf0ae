//! Marketing entry model and DTOs.

use influx_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `marketing_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingEntry {
    pub id: DbId,
    pub brand: String,
    pub product: String,
    pub campaign_title: String,
    pub file_upload: Option<String>,
    pub status: i32,
    pub onboarder_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateMarketingEntry {
    pub brand: String,
    pub product: String,
    pub campaign_title: String,
    pub file_upload: Option<String>,
    pub status: i32,
    pub onboarder_id: Option<DbId>,
}

/// DTO for updating a marketing entry. `file_upload` replaces the stored
/// file name only when `Some`; `clear_file` drops it.
#[derive(Debug, Default)]
pub struct UpdateMarketingEntry {
    pub brand: Option<String>,
    pub product: Option<String>,
    pub campaign_title: Option<String>,
    pub file_upload: Option<String>,
    pub clear_file: bool,
    pub status: Option<i32>,
}
