//! Repository for the `negotiation_costs` table.

use influx_core::influencer::NEGOTIATION_DONE;
use influx_core::types::DbId;
use sqlx::PgPool;

use crate::models::negotiation_cost::{NegotiationCost, UpsertNegotiationCost};

const COLUMNS: &str = "id, influencer_id, reel_cost, youtube_video_cost, youtube_shorts_cost, \
                       status, created_by, created_at, updated_at";

pub struct NegotiationCostRepo;

impl NegotiationCostRepo {
    /// Create or replace the costs for an influencer and flag the influencer
    /// as negotiated, atomically.
    ///
    /// Returns `None` when the influencer does not exist.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertNegotiationCost,
    ) -> Result<Option<NegotiationCost>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let flagged = sqlx::query("UPDATE influencers SET negotiation_status = $2 WHERE id = $1")
            .bind(input.influencer_id)
            .bind(NEGOTIATION_DONE)
            .execute(&mut *tx)
            .await?;
        if flagged.rows_affected() == 0 {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO negotiation_costs \
                (influencer_id, reel_cost, youtube_video_cost, youtube_shorts_cost, status, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (influencer_id) DO UPDATE \
             SET reel_cost = EXCLUDED.reel_cost, \
                 youtube_video_cost = EXCLUDED.youtube_video_cost, \
                 youtube_shorts_cost = EXCLUDED.youtube_shorts_cost, \
                 status = EXCLUDED.status \
             RETURNING {COLUMNS}"
        );
        let cost = sqlx::query_as::<_, NegotiationCost>(&query)
            .bind(input.influencer_id)
            .bind(input.reel_cost)
            .bind(input.youtube_video_cost)
            .bind(input.youtube_shorts_cost)
            .bind(input.status)
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(cost))
    }

    pub async fn find_by_influencer(
        pool: &PgPool,
        influencer_id: DbId,
    ) -> Result<Option<NegotiationCost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM negotiation_costs WHERE influencer_id = $1");
        sqlx::query_as::<_, NegotiationCost>(&query)
            .bind(influencer_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch costs for a set of influencers in one query.
    pub async fn list_for_influencers(
        pool: &PgPool,
        influencer_ids: &[DbId],
    ) -> Result<Vec<NegotiationCost>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM negotiation_costs WHERE influencer_id = ANY($1)");
        sqlx::query_as::<_, NegotiationCost>(&query)
            .bind(influencer_ids)
            .fetch_all(pool)
            .await
    }

    /// Remove an influencer's costs and reset its negotiation flag.
    ///
    /// Returns `true` if a cost row was removed.
    pub async fn delete_for_influencer(
        pool: &PgPool,
        influencer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM negotiation_costs WHERE influencer_id = $1")
            .bind(influencer_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE influencers SET negotiation_status = 0 WHERE id = $1")
            .bind(influencer_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
