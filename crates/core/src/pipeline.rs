//! Campaign pipeline stages.
//!
//! `campaigns.stage_status` stores [`PipelineStage::number`]. A stage may be
//! re-submitted or moved forward, never moved back.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Ordered steps a campaign moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Created,
    Strategy,
    InfluencerListing,
    Shortlisting,
    ClientApproval,
    Empanelment,
    BudgetRelease,
    PoDispatch,
    FinalCosts,
    ProductRequirement,
    ContentCoordination,
    LogisticsTracking,
    ContentSection,
    AssetCollection,
    BillingConfirmation,
    Completed,
}

/// Every stage in pipeline order.
pub const ALL_STAGES: [PipelineStage; 16] = [
    PipelineStage::Created,
    PipelineStage::Strategy,
    PipelineStage::InfluencerListing,
    PipelineStage::Shortlisting,
    PipelineStage::ClientApproval,
    PipelineStage::Empanelment,
    PipelineStage::BudgetRelease,
    PipelineStage::PoDispatch,
    PipelineStage::FinalCosts,
    PipelineStage::ProductRequirement,
    PipelineStage::ContentCoordination,
    PipelineStage::LogisticsTracking,
    PipelineStage::ContentSection,
    PipelineStage::AssetCollection,
    PipelineStage::BillingConfirmation,
    PipelineStage::Completed,
];

impl PipelineStage {
    /// Convert a stored stage number to a stage.
    pub fn from_number(n: i32) -> Result<Self, CoreError> {
        usize::try_from(n)
            .ok()
            .and_then(|idx| ALL_STAGES.get(idx).copied())
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid stageStatus {n}. Must be between 0 and {}",
                    ALL_STAGES.len() - 1
                ))
            })
    }

    /// The stored stage number.
    pub fn number(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Strategy => "Strategy",
            Self::InfluencerListing => "Influencer Listing",
            Self::Shortlisting => "Shortlisting",
            Self::ClientApproval => "Client Approval",
            Self::Empanelment => "Empanelment",
            Self::BudgetRelease => "Budget Release",
            Self::PoDispatch => "PO Dispatch",
            Self::FinalCosts => "Final Costs",
            Self::ProductRequirement => "Product Requirement",
            Self::ContentCoordination => "Content Coordination",
            Self::LogisticsTracking => "Logistics Tracking",
            Self::ContentSection => "Content",
            Self::AssetCollection => "Asset Collection",
            Self::BillingConfirmation => "Billing Confirmation",
            Self::Completed => "Completed",
        }
    }

    /// Validate a move from `self` to `target`.
    pub fn advance_to(self, target: Self) -> Result<Self, CoreError> {
        if target < self {
            return Err(CoreError::Validation(format!(
                "Cannot move campaign back from stage {} ({}) to {} ({})",
                self.number(),
                self.label(),
                target.number(),
                target.label()
            )));
        }
        Ok(target)
    }

    /// Stage reached by saving final costs: [`PipelineStage::FinalCosts`],
    /// unless the campaign is already further along.
    pub fn after_final_costs(self) -> Self {
        self.max(Self::FinalCosts)
    }
}

/// Validate a requested stage number against the current stored one.
pub fn validate_stage_change(current: i32, requested: i32) -> Result<PipelineStage, CoreError> {
    let current = PipelineStage::from_number(current)?;
    let requested = PipelineStage::from_number(requested)?;
    current.advance_to(requested)
}
