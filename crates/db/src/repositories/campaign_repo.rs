//! Repository for the `campaigns` table.
//!
//! Every write that touches `stage_status` or a section column locks the
//! campaign row first, so concurrent updates to one campaign apply one after
//! another against fresh state.

use influx_core::error::CoreError;
use influx_core::pipeline::{validate_stage_change, PipelineStage};
use influx_core::sections::{upsert_entries, SectionEntry};
use influx_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::models::campaign::{Campaign, CreateCampaign, InfluencerList, UpdateCampaign};

const COLUMNS: &str = "id, campaign_name, brand, product, \
    objective, target_audience, platforms, budget, start_date, end_date, deliverables, \
    strategy_notes, influencer_list, shortlisted_influencers, approved_influencers, \
    negotiation, empanelment, budget_release, po_dispatch, product_requirement, \
    content_coordination, logistics_tracking, content_section, asset_collection, \
    billing_confirmation, stage_status, status, created_by, created_at, updated_at";

/// How a write moves the campaign's pipeline cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageMove {
    Keep,
    /// Move to a caller-supplied stage number; must not be behind the current one.
    To(i32),
    /// Move to at least this stage, leaving campaigns already past it alone.
    AtLeast(PipelineStage),
}

impl From<Option<i32>> for StageMove {
    fn from(requested: Option<i32>) -> Self {
        requested.map_or(Self::Keep, Self::To)
    }
}

/// A batch of section entries to merge into a campaign.
#[derive(Debug, Clone)]
pub struct SectionUpdate<T> {
    pub entries: Vec<T>,
    /// Status stamped on every touched entry.
    pub entry_status: i32,
    pub stage: StageMove,
}

/// Failure of a locked campaign write.
#[derive(Debug, thiserror::Error)]
pub enum CampaignWriteError {
    /// The requested stage move was rejected; nothing was written.
    #[error(transparent)]
    Stage(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub struct CampaignRepo;

impl CampaignRepo {
    pub async fn create(pool: &PgPool, input: &CreateCampaign) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns (campaign_name, brand, product, created_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.campaign_name)
            .bind(&input.brand)
            .bind(&input.product)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all campaigns, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Campaign>(&query).fetch_all(pool).await
    }

    /// Edit details and strategy fields, optionally moving the stage.
    ///
    /// Returns `Ok(None)` when the campaign does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
        stage: StageMove,
    ) -> Result<Option<Campaign>, CampaignWriteError> {
        let mut tx = pool.begin().await?;
        let Some(current) = lock_stage(&mut *tx, id).await? else {
            return Ok(None);
        };
        let next = resolve_stage(current, stage)?;

        let query = format!(
            "UPDATE campaigns SET
                campaign_name = COALESCE($2, campaign_name),
                brand = COALESCE($3, brand),
                product = COALESCE($4, product),
                objective = COALESCE($5, objective),
                target_audience = COALESCE($6, target_audience),
                platforms = COALESCE($7, platforms),
                budget = COALESCE($8, budget),
                start_date = COALESCE($9, start_date),
                end_date = COALESCE($10, end_date),
                deliverables = COALESCE($11, deliverables),
                strategy_notes = COALESCE($12, strategy_notes),
                status = COALESCE($13, status),
                stage_status = $14
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let campaign = sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.campaign_name)
            .bind(&input.brand)
            .bind(&input.product)
            .bind(&input.objective)
            .bind(&input.target_audience)
            .bind(&input.platforms)
            .bind(input.budget)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.deliverables)
            .bind(&input.strategy_notes)
            .bind(&input.status)
            .bind(next)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(campaign))
    }

    /// Replace one of the influencer id lists, optionally moving the stage.
    pub async fn set_influencer_list(
        pool: &PgPool,
        id: DbId,
        list: InfluencerList,
        influencer_ids: &[DbId],
        stage: StageMove,
    ) -> Result<Option<Campaign>, CampaignWriteError> {
        let mut tx = pool.begin().await?;
        let Some(current) = lock_stage(&mut *tx, id).await? else {
            return Ok(None);
        };
        let next = resolve_stage(current, stage)?;

        let query = format!(
            "UPDATE campaigns SET {col} = $2, stage_status = $3 WHERE id = $1 RETURNING {COLUMNS}",
            col = list.column()
        );
        let campaign = sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(influencer_ids)
            .bind(next)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(campaign))
    }

    /// Merge entries into a section column, keyed by influencer id.
    ///
    /// The stage move is validated before anything is written; a rejected
    /// move leaves the campaign untouched.
    pub async fn update_section<T: SectionEntry>(
        pool: &PgPool,
        id: DbId,
        update: SectionUpdate<T>,
    ) -> Result<Option<Campaign>, CampaignWriteError> {
        let column = T::SECTION.column();
        let mut tx = pool.begin().await?;

        let locked: Option<(i32, Json<Vec<T>>)> = sqlx::query_as(&format!(
            "SELECT stage_status, {column} FROM campaigns WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((current, Json(mut entries))) = locked else {
            return Ok(None);
        };

        let next = resolve_stage(current, update.stage)?;
        let summary = upsert_entries(&mut entries, update.entries, update.entry_status);

        let query = format!(
            "UPDATE campaigns SET {column} = $2, stage_status = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let campaign = sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(Json(&entries))
            .bind(next)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(
            campaign_id = id,
            section = column,
            inserted = summary.inserted,
            updated = summary.updated,
            stage_status = next,
            "Campaign section updated",
        );
        Ok(Some(campaign))
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Lock the campaign row and read its current stage.
async fn lock_stage(conn: &mut PgConnection, id: DbId) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar("SELECT stage_status FROM campaigns WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
}

fn resolve_stage(current: i32, stage: StageMove) -> Result<i32, CoreError> {
    match stage {
        StageMove::Keep => Ok(current),
        StageMove::To(requested) => Ok(validate_stage_change(current, requested)?.number()),
        StageMove::AtLeast(floor) => {
            let current = PipelineStage::from_number(current)?;
            Ok(current.max(floor).number())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_leaves_stage_alone() {
        assert_eq!(resolve_stage(4, StageMove::Keep).unwrap(), 4);
        assert_eq!(resolve_stage(4, None.into()).unwrap(), 4);
    }

    #[test]
    fn requested_stage_must_not_regress() {
        assert_eq!(resolve_stage(4, StageMove::To(6)).unwrap(), 6);
        assert_eq!(resolve_stage(4, StageMove::To(4)).unwrap(), 4);
        assert!(resolve_stage(6, StageMove::To(4)).is_err());
        assert!(resolve_stage(6, StageMove::To(99)).is_err());
    }

    #[test]
    fn at_least_raises_but_never_lowers() {
        let floor = StageMove::AtLeast(PipelineStage::FinalCosts);
        assert_eq!(resolve_stage(5, floor).unwrap(), 8);
        assert_eq!(resolve_stage(12, floor).unwrap(), 12);
    }
}
