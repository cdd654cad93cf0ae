//! Repository for the `existing_influencers` lead table.

use influx_core::leads::{LEAD_ASSIGNED, LEAD_COMPLETED};
use influx_core::types::DbId;
use sqlx::PgPool;

use crate::models::existing_influencer::{CreateExistingInfluencer, ExistingInfluencer};

const COLUMNS: &str = "id, username, profile_link, platform, followers, category, status, \
                       assign_status, assigned_to, influencer_form_id, uploaded_by, \
                       created_at, updated_at";

pub struct ExistingInfluencerRepo;

impl ExistingInfluencerRepo {
    /// Insert every imported row in one transaction; either all land or none.
    pub async fn insert_batch(
        pool: &PgPool,
        rows: &[CreateExistingInfluencer],
    ) -> Result<Vec<ExistingInfluencer>, sqlx::Error> {
        let query = format!(
            "INSERT INTO existing_influencers \
                (username, profile_link, platform, followers, category, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let mut tx = pool.begin().await?;
        let mut inserted = Vec::with_capacity(rows.len());
        for row in rows {
            let lead = sqlx::query_as::<_, ExistingInfluencer>(&query)
                .bind(&row.username)
                .bind(&row.profile_link)
                .bind(&row.platform)
                .bind(row.followers)
                .bind(&row.category)
                .bind(row.uploaded_by)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(lead);
        }
        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ExistingInfluencer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM existing_influencers WHERE id = $1");
        sqlx::query_as::<_, ExistingInfluencer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List leads, newest first. `assigned_to` restricts to one assignee.
    pub async fn list(
        pool: &PgPool,
        assigned_to: Option<DbId>,
    ) -> Result<Vec<ExistingInfluencer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM existing_influencers \
             WHERE ($1::BIGINT IS NULL OR assigned_to = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ExistingInfluencer>(&query)
            .bind(assigned_to)
            .fetch_all(pool)
            .await
    }

    /// Set a lead's status. Moving to `assigned` also records the assignee.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        assigned_to: Option<DbId>,
    ) -> Result<Option<ExistingInfluencer>, sqlx::Error> {
        let query = format!(
            "UPDATE existing_influencers SET
                status = $2,
                assign_status = CASE WHEN $2 = $4 THEN $4 ELSE assign_status END,
                assigned_to = COALESCE($3, assigned_to)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExistingInfluencer>(&query)
            .bind(id)
            .bind(status)
            .bind(assigned_to)
            .bind(LEAD_ASSIGNED)
            .fetch_optional(pool)
            .await
    }

    /// Assign many leads to one user in a single statement.
    ///
    /// Returns the number of rows modified.
    pub async fn bulk_assign(
        pool: &PgPool,
        ids: &[DbId],
        assigned_to: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE existing_influencers \
             SET status = $3, assign_status = $3, assigned_to = $2 \
             WHERE id = ANY($1)",
        )
        .bind(ids)
        .bind(assigned_to)
        .bind(LEAD_ASSIGNED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Link a lead to the influencer record it was onboarded as and mark it
    /// completed.
    pub async fn link_form(
        pool: &PgPool,
        id: DbId,
        influencer_id: DbId,
    ) -> Result<Option<ExistingInfluencer>, sqlx::Error> {
        let query = format!(
            "UPDATE existing_influencers SET influencer_form_id = $2, status = $3 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExistingInfluencer>(&query)
            .bind(id)
            .bind(influencer_id)
            .bind(LEAD_COMPLETED)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM existing_influencers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
