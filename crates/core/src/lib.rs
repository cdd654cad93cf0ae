//! Domain rules for the influencer-marketing backend.
//!
//! Everything in this crate is free of I/O: status vocabularies, tier
//! classification, engagement metrics, the campaign pipeline, and the
//! keyed section upsert shared by every campaign section endpoint.

pub mod catalog;
pub mod error;
pub mod files;
pub mod influencer;
pub mod leads;
pub mod otp;
pub mod pipeline;
pub mod roles;
pub mod sections;
pub mod tiers;
pub mod types;
