//! Influencer vocabulary, onboarding validation and engagement metrics.
//!
//! The metric counters stored on an influencer are totals over the last
//! [`SAMPLE_POSTS`] posts, so averages divide by that constant.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Status / platform vocabulary
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// All valid review status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

pub const PLATFORM_PAID: &str = "Paid";
pub const PLATFORM_BARTER: &str = "Barter";

/// All valid `platform_type` values.
pub const VALID_PLATFORM_TYPES: &[&str] = &[PLATFORM_PAID, PLATFORM_BARTER];

/// No negotiation cost recorded yet.
pub const NEGOTIATION_PENDING: i32 = 0;
/// A negotiation cost row exists for the influencer.
pub const NEGOTIATION_DONE: i32 = 1;

/// Validate that a review status is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}

/// Validate that a platform type is one of the accepted values.
pub fn validate_platform_type(platform_type: &str) -> Result<(), String> {
    if VALID_PLATFORM_TYPES.contains(&platform_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid platformType '{platform_type}'. Must be one of: {}",
            VALID_PLATFORM_TYPES.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Onboarding form
// ---------------------------------------------------------------------------

/// Form fields that must be present and non-blank on a public onboarding
/// submission, in the order they are reported back to the caller.
pub const REQUIRED_ONBOARDING_FIELDS: &[&str] = &[
    "name",
    "email",
    "mobile",
    "city",
    "state",
    "category",
    "platformType",
    "panNumber",
    "bankAccountName",
    "bankAccountNumber",
    "ifscCode",
];

/// Return every required field that is absent or blank in `fields`.
pub fn missing_required_fields(fields: &HashMap<String, String>) -> Vec<String> {
    REQUIRED_ONBOARDING_FIELDS
        .iter()
        .filter(|name| {
            fields
                .get(**name)
                .map_or(true, |value| value.trim().is_empty())
        })
        .map(|name| name.to_string())
        .collect()
}

/// Parse an optional numeric form value. Blank values are `None`; commas
/// used as thousands separators are tolerated.
pub fn parse_count(raw: Option<&str>) -> Result<Option<i64>, String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.replace(',', "")
        .parse::<i64>()
        .map(Some)
        .map_err(|_| format!("'{raw}' is not a whole number"))
}

/// Parse an optional decimal form value (costs).
pub fn parse_amount(raw: Option<&str>) -> Result<Option<f64>, String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.replace(',', "")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("'{raw}' is not a number"))
}

// ---------------------------------------------------------------------------
// Engagement metrics
// ---------------------------------------------------------------------------

/// Number of recent posts the stored counters are summed over.
pub const SAMPLE_POSTS: f64 = 10.0;

/// Social platform an influencer is active on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Youtube,
}

/// Raw counters for one platform, as stored on the influencer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformMetrics {
    pub followers: Option<i64>,
    pub reach: Option<i64>,
    pub views: Option<i64>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub shares: Option<i64>,
    pub saves: Option<i64>,
}

impl PlatformMetrics {
    /// Sum of all per-post interaction counters.
    pub fn interactions(&self) -> i64 {
        [self.likes, self.comments, self.shares, self.saves]
            .iter()
            .map(|c| c.unwrap_or(0))
            .sum()
    }

    /// Interactions relative to average reach, as a percentage.
    ///
    /// `None` when no reach is recorded.
    pub fn engagement_rate(&self) -> Option<f64> {
        let reach = self.reach.filter(|r| *r > 0)?;
        let average_reach = reach as f64 / SAMPLE_POSTS;
        Some(self.interactions() as f64 / average_reach * 100.0)
    }

    /// Average views per sampled post.
    pub fn average_views(&self) -> Option<f64> {
        self.views.map(|v| v as f64 / SAMPLE_POSTS)
    }

    fn is_present(&self) -> bool {
        self.followers.unwrap_or(0) > 0
    }
}

/// The subset of an influencer the export filter looks at.
#[derive(Debug, Clone, Default)]
pub struct FilterCandidate {
    pub category: Option<String>,
    pub instagram: PlatformMetrics,
    pub instagram_tier: Option<String>,
    pub youtube: PlatformMetrics,
    pub youtube_tier: Option<String>,
}

/// Inclusion filter for the filtered export. Every unset bound passes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerFilter {
    pub platform: Option<Platform>,
    pub category: Option<String>,
    pub tier: Option<String>,
    pub min_followers: Option<i64>,
    pub max_followers: Option<i64>,
    pub min_engagement_rate: Option<f64>,
    pub max_engagement_rate: Option<f64>,
    pub min_avg_views: Option<f64>,
    pub max_avg_views: Option<f64>,
}

impl InfluencerFilter {
    /// True when no per-platform constraint is set.
    fn has_platform_constraints(&self) -> bool {
        self.tier.is_some()
            || self.min_followers.is_some()
            || self.max_followers.is_some()
            || self.min_engagement_rate.is_some()
            || self.max_engagement_rate.is_some()
            || self.min_avg_views.is_some()
            || self.max_avg_views.is_some()
    }

    /// Decide whether a candidate is included in the export.
    ///
    /// With an explicit platform, only that platform's metrics are checked
    /// and the influencer must be active there. Without one, any platform
    /// satisfying every constraint is enough.
    pub fn matches(&self, candidate: &FilterCandidate) -> bool {
        if let Some(category) = &self.category {
            let same = candidate
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category));
            if !same {
                return false;
            }
        }

        match self.platform {
            Some(Platform::Instagram) => {
                candidate.instagram.is_present()
                    && self.platform_matches(&candidate.instagram, candidate.instagram_tier.as_deref())
            }
            Some(Platform::Youtube) => {
                candidate.youtube.is_present()
                    && self.platform_matches(&candidate.youtube, candidate.youtube_tier.as_deref())
            }
            None if !self.has_platform_constraints() => true,
            None => {
                self.platform_matches(&candidate.instagram, candidate.instagram_tier.as_deref())
                    || self.platform_matches(&candidate.youtube, candidate.youtube_tier.as_deref())
            }
        }
    }

    fn platform_matches(&self, metrics: &PlatformMetrics, tier: Option<&str>) -> bool {
        if let Some(wanted) = &self.tier {
            if tier != Some(wanted.as_str()) {
                return false;
            }
        }
        let followers = metrics.followers.unwrap_or(0);
        if self.min_followers.is_some_and(|min| followers < min)
            || self.max_followers.is_some_and(|max| followers > max)
        {
            return false;
        }
        within(metrics.engagement_rate(), self.min_engagement_rate, self.max_engagement_rate)
            && within(metrics.average_views(), self.min_avg_views, self.max_avg_views)
    }
}

/// An unknown value fails any bound that is set.
fn within(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}
