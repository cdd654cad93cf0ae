//! Campaign-stage catalog model and DTOs.

use influx_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `campaign_stages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStage {
    pub id: DbId,
    pub stage_name: String,
    pub description: Option<String>,
    pub stakeholders: Vec<String>,
    pub workflow_type: String,
    pub stage_order: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignStage {
    pub stage_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stakeholders: Vec<String>,
    pub workflow_type: Option<String>,
    pub stage_order: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignStage {
    pub stage_name: Option<String>,
    pub description: Option<String>,
    pub stakeholders: Option<Vec<String>>,
    pub workflow_type: Option<String>,
    pub stage_order: Option<i32>,
    pub status: Option<String>,
}
