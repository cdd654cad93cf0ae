//! Handlers for the `/existing-influencers` resource (imported leads).

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use influx_core::error::CoreError;
use influx_core::leads::{rows_to_leads, validate_lead_status, LEAD_ASSIGNED};
use influx_core::types::DbId;
use influx_db::models::existing_influencer::{CreateExistingInfluencer, ExistingInfluencer};
use influx_db::repositories::{ExistingInfluencerRepo, InfluencerRepo, UserRepo};
use influx_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::spreadsheet::read_first_sheet;
use crate::state::AppState;
use crate::upload::{remove_uploads, save_upload, MultipartForm};

/// Multipart field carrying the spreadsheet.
const UPLOAD_FIELD: &str = "file";

/// Request body for `PUT /existing-influencers/{id}/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadStatusRequest {
    pub status: String,
    pub assigned_to: Option<DbId>,
}

/// Request body for `PUT /existing-influencers/bulk-assign`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignRequest {
    pub ids: Vec<DbId>,
    pub assigned_to: DbId,
}

/// Request body for `PUT /existing-influencers/{id}/link-form`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkFormRequest {
    pub influencer_id: DbId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub inserted_count: usize,
    pub leads: Vec<ExistingInfluencer>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignSummary {
    pub modified_count: u64,
}

/// POST /api/existing-influencers/upload
///
/// Import leads from the first sheet of an uploaded xlsx. The upload is
/// staged on disk for parsing and removed afterwards whatever the outcome.
pub async fn upload(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ImportSummary>>)> {
    let form = MultipartForm::collect(multipart).await?;
    let file = form
        .files
        .get(UPLOAD_FIELD)
        .ok_or_else(|| AppError::BadRequest("No spreadsheet uploaded in field 'file'".into()))?;

    let upload_dir = state.config.upload_dir.clone();
    let staged = save_upload(&upload_dir, "import", file).await?;
    let path = upload_dir.join(&staged);

    let parsed = tokio::task::spawn_blocking(move || read_first_sheet(&path))
        .await
        .map_err(|e| AppError::InternalError(format!("Spreadsheet task failed: {e}")));
    remove_uploads(&upload_dir, [staged.as_str()]).await;

    let rows = parsed?.map_err(AppError::BadRequest)?;
    let leads = rows_to_leads(&rows).map_err(AppError::BadRequest)?;
    if leads.is_empty() {
        return Err(AppError::BadRequest("Spreadsheet contains no leads".into()));
    }

    let batch: Vec<CreateExistingInfluencer> = leads
        .into_iter()
        .map(|lead| CreateExistingInfluencer {
            username: lead.username,
            profile_link: lead.profile_link,
            platform: lead.platform,
            followers: lead.followers,
            category: lead.category,
            uploaded_by: Some(auth.user_id),
        })
        .collect();
    let inserted = ExistingInfluencerRepo::insert_batch(&state.pool, &batch).await?;

    tracing::info!(user_id = auth.user_id, count = inserted.len(), "Leads imported");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ImportSummary {
                inserted_count: inserted.len(),
                leads: inserted,
            },
        }),
    ))
}

/// GET /api/existing-influencers
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ExistingInfluencer>>>> {
    let leads = ExistingInfluencerRepo::list(&state.pool, auth.owner_filter()).await?;
    Ok(Json(DataResponse { data: leads }))
}

/// GET /api/existing-influencers/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ExistingInfluencer>>> {
    let lead = find_visible(&state.pool, &auth, id).await?;
    Ok(Json(DataResponse { data: lead }))
}

/// PUT /api/existing-influencers/{id}/status
///
/// Moving a lead to `assigned` without naming an assignee assigns it to
/// the caller.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLeadStatusRequest>,
) -> AppResult<Json<DataResponse<ExistingInfluencer>>> {
    validate_lead_status(&input.status)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    find_visible(&state.pool, &auth, id).await?;

    let assigned_to = match input.assigned_to {
        Some(user_id) => {
            ensure_user_exists(&state.pool, user_id).await?;
            Some(user_id)
        }
        None if input.status == LEAD_ASSIGNED => Some(auth.user_id),
        None => None,
    };

    let lead = ExistingInfluencerRepo::update_status(&state.pool, id, &input.status, assigned_to)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ExistingInfluencer",
            id,
        }))?;
    Ok(Json(DataResponse { data: lead }))
}

/// PUT /api/existing-influencers/bulk-assign
pub async fn bulk_assign(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkAssignRequest>,
) -> AppResult<Json<DataResponse<BulkAssignSummary>>> {
    if input.ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "ids must not be empty".into(),
        )));
    }
    ensure_user_exists(&state.pool, input.assigned_to).await?;

    let modified_count =
        ExistingInfluencerRepo::bulk_assign(&state.pool, &input.ids, input.assigned_to).await?;
    tracing::info!(
        assigned_to = input.assigned_to,
        requested = input.ids.len(),
        modified_count,
        assigned_by = auth.user_id,
        "Leads bulk-assigned"
    );
    Ok(Json(DataResponse {
        data: BulkAssignSummary { modified_count },
    }))
}

/// PUT /api/existing-influencers/{id}/link-form
///
/// Record the onboarded influencer a lead turned into.
pub async fn link_form(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LinkFormRequest>,
) -> AppResult<Json<DataResponse<ExistingInfluencer>>> {
    find_visible(&state.pool, &auth, id).await?;
    InfluencerRepo::find_by_id(&state.pool, input.influencer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Influencer",
            id: input.influencer_id,
        }))?;

    let lead = ExistingInfluencerRepo::link_form(&state.pool, id, input.influencer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ExistingInfluencer",
            id,
        }))?;
    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/existing-influencers/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_visible(&state.pool, &auth, id).await?;
    if !ExistingInfluencerRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ExistingInfluencer",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Load a lead, 404 when missing, 403 when assigned to someone else.
async fn find_visible(pool: &DbPool, auth: &AuthUser, id: DbId) -> AppResult<ExistingInfluencer> {
    let lead = ExistingInfluencerRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ExistingInfluencer",
            id,
        }))?;
    if let Some(user_id) = auth.owner_filter() {
        if lead.assigned_to != Some(user_id) {
            return Err(AppError::Core(CoreError::Forbidden(
                "This lead is not assigned to you".into(),
            )));
        }
    }
    Ok(lead)
}

async fn ensure_user_exists(pool: &DbPool, user_id: DbId) -> AppResult<()> {
    UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(())
}
