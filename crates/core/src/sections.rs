//! Per-influencer campaign sections and the keyed upsert they share.
//!
//! A campaign carries one JSONB array per [`Section`]. Every entry is keyed
//! by `influencerId`; [`upsert_entries`] guarantees at most one entry per
//! influencer no matter how often a payload is resubmitted.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Entry-level status marking a section entry as filled in.
pub const ENTRY_COMPLETE: i32 = 1;
/// Entry-level status for a saved draft.
pub const ENTRY_DRAFT: i32 = 0;

/// The ten per-influencer sections stored on a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Negotiation,
    Empanelment,
    BudgetRelease,
    PoDispatch,
    ProductRequirement,
    ContentCoordination,
    LogisticsTracking,
    ContentSection,
    AssetCollection,
    BillingConfirmation,
}

impl Section {
    /// JSONB column on `campaigns` holding this section.
    pub fn column(self) -> &'static str {
        match self {
            Self::Negotiation => "negotiation",
            Self::Empanelment => "empanelment",
            Self::BudgetRelease => "budget_release",
            Self::PoDispatch => "po_dispatch",
            Self::ProductRequirement => "product_requirement",
            Self::ContentCoordination => "content_coordination",
            Self::LogisticsTracking => "logistics_tracking",
            Self::ContentSection => "content_section",
            Self::AssetCollection => "asset_collection",
            Self::BillingConfirmation => "billing_confirmation",
        }
    }
}

/// One per-influencer entry of a campaign section.
pub trait SectionEntry: Clone + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// Section the entry type belongs to.
    const SECTION: Section;

    fn influencer_id(&self) -> DbId;

    fn set_status(&mut self, status: i32);

    /// Overwrite every field that `update` supplies; absent fields are kept.
    fn merge_from(&mut self, update: Self);
}

/// Outcome of a keyed upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSummary {
    pub inserted: usize,
    pub updated: usize,
}

/// Merge `updates` into `entries`, keyed by influencer id.
///
/// Existing entries are updated in place, new influencers are appended.
/// Every touched entry gets `status`.
pub fn upsert_entries<T: SectionEntry>(
    entries: &mut Vec<T>,
    updates: Vec<T>,
    status: i32,
) -> UpsertSummary {
    let mut summary = UpsertSummary::default();
    for mut update in updates {
        let key = update.influencer_id();
        match entries.iter_mut().find(|e| e.influencer_id() == key) {
            Some(existing) => {
                existing.merge_from(update);
                existing.set_status(status);
                summary.updated += 1;
            }
            None => {
                update.set_status(status);
                entries.push(update);
                summary.inserted += 1;
            }
        }
    }
    summary
}

/// Declare a section entry type: the shared key and status plus optional
/// section-specific fields, with field-wise merge.
macro_rules! section_entry {
    (
        $(#[$meta:meta])*
        $name:ident => $section:expr,
        { $($field:ident : $ty:ty),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub influencer_id: DbId,
            #[serde(default)]
            pub status: i32,
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl SectionEntry for $name {
            const SECTION: Section = $section;

            fn influencer_id(&self) -> DbId {
                self.influencer_id
            }

            fn set_status(&mut self, status: i32) {
                self.status = status;
            }

            fn merge_from(&mut self, update: Self) {
                $(
                    if update.$field.is_some() {
                        self.$field = update.$field;
                    }
                )*
            }
        }
    };
}

section_entry! {
    /// Final negotiated costs agreed for an influencer on this campaign.
    NegotiationEntry => Section::Negotiation,
    {
        reel_cost: f64,
        story_cost: f64,
        post_cost: f64,
        youtube_video_cost: f64,
        youtube_shorts_cost: f64,
        final_cost: f64,
        deliverables: String,
        remarks: String,
    }
}

section_entry! {
    EmpanelmentEntry => Section::Empanelment,
    {
        agreement_signed: bool,
        agreement_date: NaiveDate,
        agreement_file: String,
        remarks: String,
    }
}

section_entry! {
    BudgetReleaseEntry => Section::BudgetRelease,
    {
        amount: f64,
        release_date: NaiveDate,
        payment_mode: String,
        transaction_ref: String,
        remarks: String,
    }
}

section_entry! {
    /// Purchase order issued to the influencer.
    PoDispatchEntry => Section::PoDispatch,
    {
        po_number: String,
        po_date: NaiveDate,
        po_amount: f64,
        remarks: String,
    }
}

section_entry! {
    ProductRequirementEntry => Section::ProductRequirement,
    {
        product_name: String,
        quantity: i32,
        size: String,
        shipping_address: String,
        remarks: String,
    }
}

section_entry! {
    ContentCoordinationEntry => Section::ContentCoordination,
    {
        content_type: String,
        brief: String,
        script_approved: bool,
        go_live_date: NaiveDate,
        remarks: String,
    }
}

section_entry! {
    LogisticsTrackingEntry => Section::LogisticsTracking,
    {
        courier_name: String,
        tracking_number: String,
        dispatch_date: NaiveDate,
        delivery_status: String,
        remarks: String,
    }
}

section_entry! {
    /// Published content links.
    ContentSectionEntry => Section::ContentSection,
    {
        content_link: String,
        content_type: String,
        posted_date: NaiveDate,
        remarks: String,
    }
}

section_entry! {
    AssetCollectionEntry => Section::AssetCollection,
    {
        asset_link: String,
        raw_files_link: String,
        usage_rights: String,
        remarks: String,
    }
}

section_entry! {
    BillingConfirmationEntry => Section::BillingConfirmation,
    {
        invoice_number: String,
        invoice_amount: f64,
        invoice_date: NaiveDate,
        payment_status: String,
        remarks: String,
    }
}
