//! Repository for the `influencers` table.

use influx_core::influencer::PLATFORM_BARTER;
use influx_core::types::DbId;
use sqlx::PgPool;

use crate::models::influencer::{CreateInfluencer, Influencer, UpdateInfluencer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, mobile, gender, date_of_birth, city, state, country, \
    address, pincode, languages, category, \
    instagram_username, instagram_link, instagram_followers, instagram_tier, instagram_reach, \
    instagram_views, instagram_likes, instagram_comments, instagram_shares, instagram_saves, \
    youtube_channel_name, youtube_link, youtube_subscribers, youtube_tier, youtube_reach, \
    youtube_views, youtube_likes, youtube_comments, youtube_shares, \
    platform_type, reel_cost, story_cost, post_cost, youtube_video_cost, youtube_shorts_cost, \
    pan_number, gst_number, bank_account_name, bank_account_number, bank_name, ifsc_code, upi_id, \
    pan_card_file, cancelled_cheque_file, profile_picture, media_kit_file, \
    status, rejection_reason, negotiation_status, onboarder_id, created_at, updated_at";

/// Which influencers a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfluencerScope {
    /// Every influencer (super admins).
    All,
    /// Only influencers onboarded by the given user.
    OnboardedBy(DbId),
}

impl InfluencerScope {
    fn onboarder(self) -> Option<DbId> {
        match self {
            Self::All => None,
            Self::OnboardedBy(id) => Some(id),
        }
    }
}

pub struct InfluencerRepo;

impl InfluencerRepo {
    /// Insert an onboarded influencer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateInfluencer) -> Result<Influencer, sqlx::Error> {
        let query = format!(
            "INSERT INTO influencers (
                name, email, mobile, gender, date_of_birth, city, state, country,
                address, pincode, languages, category,
                instagram_username, instagram_link, instagram_followers, instagram_tier,
                instagram_reach, instagram_views, instagram_likes, instagram_comments,
                instagram_shares, instagram_saves,
                youtube_channel_name, youtube_link, youtube_subscribers, youtube_tier,
                youtube_reach, youtube_views, youtube_likes, youtube_comments, youtube_shares,
                platform_type, reel_cost, story_cost, post_cost, youtube_video_cost,
                youtube_shorts_cost,
                pan_number, gst_number, bank_account_name, bank_account_number, bank_name,
                ifsc_code, upi_id,
                pan_card_file, cancelled_cheque_file, profile_picture, media_kit_file,
                onboarder_id
             ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18, $19, $20, $21, $22,
                $23, $24, $25, $26, $27, $28, $29, $30, $31,
                $32, $33, $34, $35, $36, $37,
                $38, $39, $40, $41, $42, $43, $44,
                $45, $46, $47, $48,
                $49
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Influencer>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.mobile)
            .bind(&input.gender)
            .bind(input.date_of_birth)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.country)
            .bind(&input.address)
            .bind(&input.pincode)
            .bind(&input.languages)
            .bind(&input.category)
            .bind(&input.instagram_username)
            .bind(&input.instagram_link)
            .bind(input.instagram_followers)
            .bind(&input.instagram_tier)
            .bind(input.instagram_reach)
            .bind(input.instagram_views)
            .bind(input.instagram_likes)
            .bind(input.instagram_comments)
            .bind(input.instagram_shares)
            .bind(input.instagram_saves)
            .bind(&input.youtube_channel_name)
            .bind(&input.youtube_link)
            .bind(input.youtube_subscribers)
            .bind(&input.youtube_tier)
            .bind(input.youtube_reach)
            .bind(input.youtube_views)
            .bind(input.youtube_likes)
            .bind(input.youtube_comments)
            .bind(input.youtube_shares)
            .bind(&input.platform_type)
            .bind(input.reel_cost)
            .bind(input.story_cost)
            .bind(input.post_cost)
            .bind(input.youtube_video_cost)
            .bind(input.youtube_shorts_cost)
            .bind(&input.pan_number)
            .bind(&input.gst_number)
            .bind(&input.bank_account_name)
            .bind(&input.bank_account_number)
            .bind(&input.bank_name)
            .bind(&input.ifsc_code)
            .bind(&input.upi_id)
            .bind(&input.pan_card_file)
            .bind(&input.cancelled_cheque_file)
            .bind(&input.profile_picture)
            .bind(&input.media_kit_file)
            .bind(input.onboarder_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Influencer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM influencers WHERE id = $1");
        sqlx::query_as::<_, Influencer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch several influencers, preserving no particular order.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Influencer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM influencers WHERE id = ANY($1)");
        sqlx::query_as::<_, Influencer>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List influencers visible in `scope`, newest first.
    ///
    /// `barter` selects Barter influencers only; otherwise Barter ones are
    /// excluded.
    pub async fn list(
        pool: &PgPool,
        scope: InfluencerScope,
        barter: bool,
    ) -> Result<Vec<Influencer>, sqlx::Error> {
        let platform_clause = if barter {
            "platform_type = $2"
        } else {
            "platform_type <> $2"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM influencers \
             WHERE ($1::BIGINT IS NULL OR onboarder_id = $1) AND {platform_clause} \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Influencer>(&query)
            .bind(scope.onboarder())
            .bind(PLATFORM_BARTER)
            .fetch_all(pool)
            .await
    }

    /// Set the review status. `rejection_reason` is overwritten (cleared
    /// when `None`).
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        rejection_reason: Option<&str>,
    ) -> Result<Option<Influencer>, sqlx::Error> {
        let query = format!(
            "UPDATE influencers SET status = $2, rejection_reason = $3 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Influencer>(&query)
            .bind(id)
            .bind(status)
            .bind(rejection_reason)
            .fetch_optional(pool)
            .await
    }

    /// Apply an admin edit. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInfluencer,
    ) -> Result<Option<Influencer>, sqlx::Error> {
        let query = format!(
            "UPDATE influencers SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                mobile = COALESCE($4, mobile),
                city = COALESCE($5, city),
                state = COALESCE($6, state),
                category = COALESCE($7, category),
                instagram_username = COALESCE($8, instagram_username),
                instagram_followers = COALESCE($9, instagram_followers),
                instagram_tier = COALESCE($10, instagram_tier),
                instagram_reach = COALESCE($11, instagram_reach),
                instagram_views = COALESCE($12, instagram_views),
                youtube_channel_name = COALESCE($13, youtube_channel_name),
                youtube_subscribers = COALESCE($14, youtube_subscribers),
                youtube_tier = COALESCE($15, youtube_tier),
                youtube_reach = COALESCE($16, youtube_reach),
                youtube_views = COALESCE($17, youtube_views),
                platform_type = COALESCE($18, platform_type),
                reel_cost = COALESCE($19, reel_cost),
                story_cost = COALESCE($20, story_cost),
                post_cost = COALESCE($21, post_cost),
                youtube_video_cost = COALESCE($22, youtube_video_cost),
                youtube_shorts_cost = COALESCE($23, youtube_shorts_cost),
                instagram_likes = COALESCE($24, instagram_likes),
                instagram_comments = COALESCE($25, instagram_comments),
                instagram_shares = COALESCE($26, instagram_shares),
                instagram_saves = COALESCE($27, instagram_saves),
                youtube_likes = COALESCE($28, youtube_likes),
                youtube_comments = COALESCE($29, youtube_comments),
                youtube_shares = COALESCE($30, youtube_shares)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Influencer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.mobile)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.category)
            .bind(&input.instagram_username)
            .bind(input.instagram_followers)
            .bind(&input.instagram_tier)
            .bind(input.instagram_reach)
            .bind(input.instagram_views)
            .bind(&input.youtube_channel_name)
            .bind(input.youtube_subscribers)
            .bind(&input.youtube_tier)
            .bind(input.youtube_reach)
            .bind(input.youtube_views)
            .bind(&input.platform_type)
            .bind(input.reel_cost)
            .bind(input.story_cost)
            .bind(input.post_cost)
            .bind(input.youtube_video_cost)
            .bind(input.youtube_shorts_cost)
            .bind(input.instagram_likes)
            .bind(input.instagram_comments)
            .bind(input.instagram_shares)
            .bind(input.instagram_saves)
            .bind(input.youtube_likes)
            .bind(input.youtube_comments)
            .bind(input.youtube_shares)
            .fetch_optional(pool)
            .await
    }

    /// Delete an influencer. Returns the removed row so callers can clean
    /// up its stored files.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Influencer>, sqlx::Error> {
        let query = format!("DELETE FROM influencers WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Influencer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
