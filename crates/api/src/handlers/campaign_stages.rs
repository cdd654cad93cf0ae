//! Handlers for the `/campaign-stages` reference catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use influx_core::catalog::{validate_stage_status, validate_workflow_type};
use influx_core::error::CoreError;
use influx_core::types::DbId;
use influx_db::models::campaign_stage::{CreateCampaignStage, UpdateCampaignStage};
use influx_db::repositories::CampaignStageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/campaign-stages
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCampaignStage>,
) -> AppResult<impl IntoResponse> {
    if input.stage_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::MissingFields(vec![
            "stageName".into(),
        ])));
    }
    validate_catalog_fields(
        input.workflow_type.as_deref(),
        input.status.as_deref(),
        input.stage_order,
    )?;

    let stage = CampaignStageRepo::create(&state.pool, &input).await?;
    tracing::info!(stage_id = stage.id, created_by = auth.user_id, "Campaign stage created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: stage })))
}

/// GET /api/campaign-stages
///
/// Ordered by `stageOrder`.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stages = CampaignStageRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: stages }))
}

/// GET /api/campaign-stages/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stage = CampaignStageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CampaignStage",
            id,
        }))?;
    Ok(Json(DataResponse { data: stage }))
}

/// PUT /api/campaign-stages/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaignStage>,
) -> AppResult<impl IntoResponse> {
    if input
        .stage_name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Err(AppError::Core(CoreError::Validation(
            "stageName cannot be blank".into(),
        )));
    }
    validate_catalog_fields(
        input.workflow_type.as_deref(),
        input.status.as_deref(),
        input.stage_order,
    )?;

    let stage = CampaignStageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CampaignStage",
            id,
        }))?;
    Ok(Json(DataResponse { data: stage }))
}

/// DELETE /api/campaign-stages/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CampaignStageRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CampaignStage",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn validate_catalog_fields(
    workflow_type: Option<&str>,
    status: Option<&str>,
    stage_order: Option<i32>,
) -> AppResult<()> {
    let invalid = |msg: String| AppError::Core(CoreError::Validation(msg));
    if let Some(workflow_type) = workflow_type {
        validate_workflow_type(workflow_type).map_err(invalid)?;
    }
    if let Some(status) = status {
        validate_stage_status(status).map_err(invalid)?;
    }
    if stage_order.is_some_and(|order| order < 0) {
        return Err(invalid("stageOrder cannot be negative".into()));
    }
    Ok(())
}
