//! Campaign entity model and DTOs.

use chrono::NaiveDate;
use influx_core::sections::{
    AssetCollectionEntry, BillingConfirmationEntry, BudgetReleaseEntry, ContentCoordinationEntry,
    ContentSectionEntry, EmpanelmentEntry, LogisticsTrackingEntry, NegotiationEntry,
    PoDispatchEntry, ProductRequirementEntry,
};
use influx_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `campaigns` table, sections decoded into typed entries.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: DbId,
    pub campaign_name: String,
    pub brand: String,
    pub product: Option<String>,

    pub objective: Option<String>,
    pub target_audience: Option<String>,
    pub platforms: Vec<String>,
    pub budget: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub deliverables: Option<String>,
    pub strategy_notes: Option<String>,

    pub influencer_list: Vec<DbId>,
    pub shortlisted_influencers: Vec<DbId>,
    pub approved_influencers: Vec<DbId>,

    pub negotiation: Json<Vec<NegotiationEntry>>,
    pub empanelment: Json<Vec<EmpanelmentEntry>>,
    pub budget_release: Json<Vec<BudgetReleaseEntry>>,
    pub po_dispatch: Json<Vec<PoDispatchEntry>>,
    pub product_requirement: Json<Vec<ProductRequirementEntry>>,
    pub content_coordination: Json<Vec<ContentCoordinationEntry>>,
    pub logistics_tracking: Json<Vec<LogisticsTrackingEntry>>,
    pub content_section: Json<Vec<ContentSectionEntry>>,
    pub asset_collection: Json<Vec<AssetCollectionEntry>>,
    pub billing_confirmation: Json<Vec<BillingConfirmationEntry>>,

    pub stage_status: i32,
    pub status: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a campaign. Sections and id lists start empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaign {
    pub campaign_name: String,
    pub brand: String,
    pub product: Option<String>,
    #[serde(skip)]
    pub created_by: Option<DbId>,
}

/// DTO for editing campaign details and strategy. Only non-`None` fields
/// are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaign {
    pub campaign_name: Option<String>,
    pub brand: Option<String>,
    pub product: Option<String>,
    pub objective: Option<String>,
    pub target_audience: Option<String>,
    pub platforms: Option<Vec<String>>,
    pub budget: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub deliverables: Option<String>,
    pub strategy_notes: Option<String>,
    pub status: Option<String>,
}

/// The three influencer-id lists stored on a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfluencerList {
    Listed,
    Shortlisted,
    Approved,
}

impl InfluencerList {
    /// Array column on `campaigns` holding the list.
    pub fn column(self) -> &'static str {
        match self {
            Self::Listed => "influencer_list",
            Self::Shortlisted => "shortlisted_influencers",
            Self::Approved => "approved_influencers",
        }
    }

    /// Project the list out of a loaded campaign.
    pub fn ids(self, campaign: &Campaign) -> &[DbId] {
        match self {
            Self::Listed => &campaign.influencer_list,
            Self::Shortlisted => &campaign.shortlisted_influencers,
            Self::Approved => &campaign.approved_influencers,
        }
    }
}
