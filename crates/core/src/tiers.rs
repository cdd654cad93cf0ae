//! Follower-count tier classification.
//!
//! Each platform is classified independently. The boundaries are inclusive
//! on the lower end: 10,000 followers is Micro, 9,999 is Lower.

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the Micro tier.
pub const MICRO_MIN: i64 = 10_000;
/// Lower bound (inclusive) of the Macro tier.
pub const MACRO_MIN: i64 = 100_000;
/// Lower bound (inclusive) of the Mid-tier tier.
pub const MID_TIER_MIN: i64 = 500_000;
/// Lower bound (inclusive) of the Mega tier.
pub const MEGA_MIN: i64 = 1_000_000;
/// Lower bound (inclusive) of the Celeb tier.
pub const CELEB_MIN: i64 = 5_000_000;

/// Audience-size label for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// No followers recorded.
    #[serde(rename = "-")]
    Unranked,
    Lower,
    Micro,
    Macro,
    #[serde(rename = "Mid-tier")]
    MidTier,
    Mega,
    Celeb,
}

impl Tier {
    /// Classify a follower count. `None`, zero and negative counts are unranked.
    pub fn classify(followers: Option<i64>) -> Self {
        match followers.unwrap_or(0) {
            n if n <= 0 => Self::Unranked,
            n if n < MICRO_MIN => Self::Lower,
            n if n < MACRO_MIN => Self::Micro,
            n if n < MID_TIER_MIN => Self::Macro,
            n if n < MEGA_MIN => Self::MidTier,
            n if n < CELEB_MIN => Self::Mega,
            _ => Self::Celeb,
        }
    }

    /// Label stored in the database and shown in exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unranked => "-",
            Self::Lower => "Lower",
            Self::Micro => "Micro",
            Self::Macro => "Macro",
            Self::MidTier => "Mid-tier",
            Self::Mega => "Mega",
            Self::Celeb => "Celeb",
        }
    }
}

/// Convenience wrapper returning the stored label directly.
pub fn tier_label(followers: Option<i64>) -> String {
    Tier::classify(followers).as_str().to_string()
}
