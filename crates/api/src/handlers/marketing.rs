//! Handlers for the `/marketing` resource.
//!
//! Create and update take multipart bodies with an optional `fileUpload`
//! file. A replaced or removed file is deleted from disk once the row no
//! longer references it.

use axum::extract::{Multipart, Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use influx_core::catalog::{validate_active_flag, ACTIVE};
use influx_core::error::CoreError;
use influx_core::files::content_type_for;
use influx_core::types::DbId;
use influx_db::models::marketing::{CreateMarketingEntry, MarketingEntry, UpdateMarketingEntry};
use influx_db::repositories::MarketingRepo;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::{remove_uploads, resolve_stored, save_upload, MultipartForm};

const FILE_FIELD: &str = "fileUpload";

/// POST /api/marketing
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<MarketingEntry>>)> {
    let form = MultipartForm::collect(multipart).await?;

    let missing: Vec<String> = ["brand", "product", "campaignTitle"]
        .into_iter()
        .filter(|f| form.text(f).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::MissingFields(missing)));
    }
    let status = status_field(&form)?.unwrap_or(ACTIVE);

    let upload_dir = &state.config.upload_dir;
    let file_upload = match form.files.get(FILE_FIELD) {
        Some(file) => Some(save_upload(upload_dir, FILE_FIELD, file).await?),
        None => None,
    };

    let input = CreateMarketingEntry {
        brand: form.text("brand").unwrap_or_default(),
        product: form.text("product").unwrap_or_default(),
        campaign_title: form.text("campaignTitle").unwrap_or_default(),
        file_upload,
        status,
        onboarder_id: Some(auth.user_id),
    };
    let entry = match MarketingRepo::create(&state.pool, &input).await {
        Ok(entry) => entry,
        Err(e) => {
            remove_uploads(upload_dir, input.file_upload.as_deref()).await;
            return Err(e.into());
        }
    };

    tracing::info!(entry_id = entry.id, onboarder_id = auth.user_id, "Marketing entry created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/marketing
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MarketingEntry>>>> {
    let entries = MarketingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/marketing/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MarketingEntry>>> {
    let entry = MarketingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: entry }))
}

/// PUT /api/marketing/{id}
///
/// A new `fileUpload` replaces the stored file; `removeFile=true` drops it.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<MarketingEntry>>> {
    let form = MultipartForm::collect(multipart).await?;
    let existing = MarketingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    let upload_dir = &state.config.upload_dir;
    let file_upload = match form.files.get(FILE_FIELD) {
        Some(file) => Some(save_upload(upload_dir, FILE_FIELD, file).await?),
        None => None,
    };
    let clear_file = file_upload.is_none()
        && form
            .text("removeFile")
            .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1");

    let input = UpdateMarketingEntry {
        brand: form.text("brand"),
        product: form.text("product"),
        campaign_title: form.text("campaignTitle"),
        file_upload,
        clear_file,
        status: status_field(&form)?,
    };
    let entry = match MarketingRepo::update(&state.pool, id, &input).await {
        Ok(Some(entry)) => entry,
        Ok(None) => {
            remove_uploads(upload_dir, input.file_upload.as_deref()).await;
            return Err(not_found(id));
        }
        Err(e) => {
            remove_uploads(upload_dir, input.file_upload.as_deref()).await;
            return Err(e.into());
        }
    };

    if entry.file_upload != existing.file_upload {
        remove_uploads(upload_dir, existing.file_upload.as_deref()).await;
    }
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/marketing/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = MarketingRepo::delete(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    remove_uploads(&state.config.upload_dir, removed.file_upload.as_deref()).await;
    tracing::info!(entry_id = id, deleted_by = auth.user_id, "Marketing entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/marketing/files/{filename}
pub async fn download_file(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let path = resolve_stored(&state.config.upload_dir, &filename)?;
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok((
            StatusCode::OK,
            [(CONTENT_TYPE, content_type_for(&filename))],
            bytes,
        )
            .into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "File not found", "code": "NOT_FOUND" })),
        )
            .into_response()),
        Err(e) => Err(AppError::InternalError(format!("Failed to read file: {e}"))),
    }
}

fn status_field(form: &MultipartForm) -> AppResult<Option<i32>> {
    form.text("status")
        .map(|raw| {
            let value = raw.parse::<i32>().map_err(|_| {
                AppError::Core(CoreError::Validation("status must be 0 or 1".into()))
            })?;
            validate_active_flag(value).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Ok(value)
        })
        .transpose()
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MarketingEntry",
        id,
    })
}
