//! Repository types, one per table.
//!
//! Repositories are zero-sized structs with associated `async fn`s taking a
//! pool (or a transaction where atomicity matters) as the first argument.

mod brand_repo;
mod campaign_repo;
mod campaign_stage_repo;
mod existing_influencer_repo;
mod influencer_repo;
mod marketing_repo;
mod negotiation_cost_repo;
mod otp_repo;
mod product_repo;
mod user_repo;

pub use brand_repo::BrandRepo;
pub use campaign_repo::{CampaignRepo, CampaignWriteError, SectionUpdate, StageMove};
pub use campaign_stage_repo::CampaignStageRepo;
pub use existing_influencer_repo::ExistingInfluencerRepo;
pub use influencer_repo::{InfluencerRepo, InfluencerScope};
pub use marketing_repo::MarketingRepo;
pub use negotiation_cost_repo::NegotiationCostRepo;
pub use otp_repo::OtpRepo;
pub use product_repo::ProductRepo;
pub use user_repo::UserRepo;
