pub mod brand;
pub mod campaign;
pub mod campaign_stage;
pub mod existing_influencer;
pub mod influencer;
pub mod marketing;
pub mod negotiation_cost;
pub mod otp;
pub mod product;
pub mod user;
