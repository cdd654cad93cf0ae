//! Negotiated per-influencer costs.

use influx_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `negotiation_costs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationCost {
    pub id: DbId,
    pub influencer_id: DbId,
    pub reel_cost: Option<f64>,
    pub youtube_video_cost: Option<f64>,
    pub youtube_shorts_cost: Option<f64>,
    pub status: i32,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing an influencer's negotiated costs.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertNegotiationCost {
    pub influencer_id: DbId,
    pub reel_cost: Option<f64>,
    pub youtube_video_cost: Option<f64>,
    pub youtube_shorts_cost: Option<f64>,
    pub status: i32,
    pub created_by: Option<DbId>,
}
