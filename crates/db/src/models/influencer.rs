//! Influencer entity model and DTOs.

use chrono::NaiveDate;
use influx_core::influencer::{FilterCandidate, PlatformMetrics};
use influx_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `influencers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Influencer {
    pub id: DbId,

    pub name: String,
    pub email: String,
    pub mobile: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub city: String,
    pub state: String,
    pub country: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub languages: Option<String>,
    pub category: String,

    pub instagram_username: Option<String>,
    pub instagram_link: Option<String>,
    pub instagram_followers: Option<i64>,
    pub instagram_tier: String,
    pub instagram_reach: Option<i64>,
    pub instagram_views: Option<i64>,
    pub instagram_likes: Option<i64>,
    pub instagram_comments: Option<i64>,
    pub instagram_shares: Option<i64>,
    pub instagram_saves: Option<i64>,

    pub youtube_channel_name: Option<String>,
    pub youtube_link: Option<String>,
    pub youtube_subscribers: Option<i64>,
    pub youtube_tier: String,
    pub youtube_reach: Option<i64>,
    pub youtube_views: Option<i64>,
    pub youtube_likes: Option<i64>,
    pub youtube_comments: Option<i64>,
    pub youtube_shares: Option<i64>,

    pub platform_type: String,
    pub reel_cost: Option<f64>,
    pub story_cost: Option<f64>,
    pub post_cost: Option<f64>,
    pub youtube_video_cost: Option<f64>,
    pub youtube_shorts_cost: Option<f64>,

    pub pan_number: String,
    pub gst_number: Option<String>,
    pub bank_account_name: String,
    pub bank_account_number: String,
    pub bank_name: Option<String>,
    pub ifsc_code: String,
    pub upi_id: Option<String>,

    pub pan_card_file: Option<String>,
    pub cancelled_cheque_file: Option<String>,
    pub profile_picture: Option<String>,
    pub media_kit_file: Option<String>,

    pub status: String,
    pub rejection_reason: Option<String>,
    pub negotiation_status: i32,
    pub onboarder_id: Option<DbId>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Influencer {
    pub fn instagram_metrics(&self) -> PlatformMetrics {
        PlatformMetrics {
            followers: self.instagram_followers,
            reach: self.instagram_reach,
            views: self.instagram_views,
            likes: self.instagram_likes,
            comments: self.instagram_comments,
            shares: self.instagram_shares,
            saves: self.instagram_saves,
        }
    }

    pub fn youtube_metrics(&self) -> PlatformMetrics {
        PlatformMetrics {
            followers: self.youtube_subscribers,
            reach: self.youtube_reach,
            views: self.youtube_views,
            likes: self.youtube_likes,
            comments: self.youtube_comments,
            shares: self.youtube_shares,
            saves: None,
        }
    }

    /// The fields the filtered export inspects.
    pub fn filter_candidate(&self) -> FilterCandidate {
        FilterCandidate {
            category: Some(self.category.clone()),
            instagram: self.instagram_metrics(),
            instagram_tier: Some(self.instagram_tier.clone()),
            youtube: self.youtube_metrics(),
            youtube_tier: Some(self.youtube_tier.clone()),
        }
    }
}

/// DTO for inserting an onboarded influencer.
#[derive(Debug, Clone, Default)]
pub struct CreateInfluencer {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub city: String,
    pub state: String,
    pub country: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub languages: Option<String>,
    pub category: String,

    pub instagram_username: Option<String>,
    pub instagram_link: Option<String>,
    pub instagram_followers: Option<i64>,
    pub instagram_tier: String,
    pub instagram_reach: Option<i64>,
    pub instagram_views: Option<i64>,
    pub instagram_likes: Option<i64>,
    pub instagram_comments: Option<i64>,
    pub instagram_shares: Option<i64>,
    pub instagram_saves: Option<i64>,

    pub youtube_channel_name: Option<String>,
    pub youtube_link: Option<String>,
    pub youtube_subscribers: Option<i64>,
    pub youtube_tier: String,
    pub youtube_reach: Option<i64>,
    pub youtube_views: Option<i64>,
    pub youtube_likes: Option<i64>,
    pub youtube_comments: Option<i64>,
    pub youtube_shares: Option<i64>,

    pub platform_type: String,
    pub reel_cost: Option<f64>,
    pub story_cost: Option<f64>,
    pub post_cost: Option<f64>,
    pub youtube_video_cost: Option<f64>,
    pub youtube_shorts_cost: Option<f64>,

    pub pan_number: String,
    pub gst_number: Option<String>,
    pub bank_account_name: String,
    pub bank_account_number: String,
    pub bank_name: Option<String>,
    pub ifsc_code: String,
    pub upi_id: Option<String>,

    pub pan_card_file: Option<String>,
    pub cancelled_cheque_file: Option<String>,
    pub profile_picture: Option<String>,
    pub media_kit_file: Option<String>,

    pub onboarder_id: Option<DbId>,
}

/// DTO for an admin edit of an influencer. Only non-`None` fields are applied.
///
/// Follower counts re-derive the stored tier, so callers set the tier
/// fields alongside the counts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfluencer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub category: Option<String>,
    pub instagram_username: Option<String>,
    pub instagram_followers: Option<i64>,
    #[serde(skip)]
    pub instagram_tier: Option<String>,
    pub instagram_reach: Option<i64>,
    pub instagram_views: Option<i64>,
    pub instagram_likes: Option<i64>,
    pub instagram_comments: Option<i64>,
    pub instagram_shares: Option<i64>,
    pub instagram_saves: Option<i64>,
    pub youtube_channel_name: Option<String>,
    pub youtube_subscribers: Option<i64>,
    #[serde(skip)]
    pub youtube_tier: Option<String>,
    pub youtube_reach: Option<i64>,
    pub youtube_views: Option<i64>,
    pub youtube_likes: Option<i64>,
    pub youtube_comments: Option<i64>,
    pub youtube_shares: Option<i64>,
    pub platform_type: Option<String>,
    pub reel_cost: Option<f64>,
    pub story_cost: Option<f64>,
    pub post_cost: Option<f64>,
    pub youtube_video_cost: Option<f64>,
    pub youtube_shorts_cost: Option<f64>,
}
