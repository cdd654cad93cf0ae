//! Repository for the `marketing_entries` table.

use influx_core::types::DbId;
use sqlx::PgPool;

use crate::models::marketing::{CreateMarketingEntry, MarketingEntry, UpdateMarketingEntry};

const COLUMNS: &str = "id, brand, product, campaign_title, file_upload, status, onboarder_id, \
                       created_at, updated_at";

pub struct MarketingRepo;

impl MarketingRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateMarketingEntry,
    ) -> Result<MarketingEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO marketing_entries \
                (brand, product, campaign_title, file_upload, status, onboarder_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketingEntry>(&query)
            .bind(&input.brand)
            .bind(&input.product)
            .bind(&input.campaign_title)
            .bind(&input.file_upload)
            .bind(input.status)
            .bind(input.onboarder_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MarketingEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marketing_entries WHERE id = $1");
        sqlx::query_as::<_, MarketingEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<MarketingEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marketing_entries ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, MarketingEntry>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMarketingEntry,
    ) -> Result<Option<MarketingEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE marketing_entries SET
                brand = COALESCE($2, brand),
                product = COALESCE($3, product),
                campaign_title = COALESCE($4, campaign_title),
                file_upload = CASE WHEN $7 THEN NULL ELSE COALESCE($5, file_upload) END,
                status = COALESCE($6, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketingEntry>(&query)
            .bind(id)
            .bind(&input.brand)
            .bind(&input.product)
            .bind(&input.campaign_title)
            .bind(&input.file_upload)
            .bind(input.status)
            .bind(input.clear_file)
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry, returning it so the caller can remove its file.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<MarketingEntry>, sqlx::Error> {
        let query = format!("DELETE FROM marketing_entries WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, MarketingEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
