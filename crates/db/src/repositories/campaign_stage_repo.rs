//! Repository for the `campaign_stages` catalog.

use influx_core::catalog::{STAGE_PENDING, WORKFLOW_SEQUENCE};
use influx_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign_stage::{CampaignStage, CreateCampaignStage, UpdateCampaignStage};

const COLUMNS: &str = "id, stage_name, description, stakeholders, workflow_type, stage_order, \
                       status, created_at, updated_at";

pub struct CampaignStageRepo;

impl CampaignStageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCampaignStage,
    ) -> Result<CampaignStage, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_stages \
                (stage_name, description, stakeholders, workflow_type, stage_order, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignStage>(&query)
            .bind(&input.stage_name)
            .bind(&input.description)
            .bind(&input.stakeholders)
            .bind(input.workflow_type.as_deref().unwrap_or(WORKFLOW_SEQUENCE))
            .bind(input.stage_order.unwrap_or(0))
            .bind(input.status.as_deref().unwrap_or(STAGE_PENDING))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CampaignStage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaign_stages WHERE id = $1");
        sqlx::query_as::<_, CampaignStage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the catalog in stage order.
    pub async fn list(pool: &PgPool) -> Result<Vec<CampaignStage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaign_stages ORDER BY stage_order, id");
        sqlx::query_as::<_, CampaignStage>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaignStage,
    ) -> Result<Option<CampaignStage>, sqlx::Error> {
        let query = format!(
            "UPDATE campaign_stages SET
                stage_name = COALESCE($2, stage_name),
                description = COALESCE($3, description),
                stakeholders = COALESCE($4, stakeholders),
                workflow_type = COALESCE($5, workflow_type),
                stage_order = COALESCE($6, stage_order),
                status = COALESCE($7, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignStage>(&query)
            .bind(id)
            .bind(&input.stage_name)
            .bind(&input.description)
            .bind(&input.stakeholders)
            .bind(&input.workflow_type)
            .bind(input.stage_order)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaign_stages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
