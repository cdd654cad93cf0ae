//! Existing-influencer lead model and DTOs.

use influx_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `existing_influencers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingInfluencer {
    pub id: DbId,
    pub username: String,
    pub profile_link: Option<String>,
    pub platform: Option<String>,
    pub followers: Option<i64>,
    pub category: Option<String>,
    pub status: String,
    pub assign_status: String,
    pub assigned_to: Option<DbId>,
    pub influencer_form_id: Option<DbId>,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting one imported lead.
#[derive(Debug, Clone)]
pub struct CreateExistingInfluencer {
    pub username: String,
    pub profile_link: Option<String>,
    pub platform: Option<String>,
    pub followers: Option<i64>,
    pub category: Option<String>,
    pub uploaded_by: Option<DbId>,
}
