//! Handlers for the `/brands` catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use influx_core::catalog::validate_active_flag;
use influx_core::error::CoreError;
use influx_core::types::DbId;
use influx_db::models::brand::{CreateBrand, UpdateBrand};
use influx_db::repositories::BrandRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/brands
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateBrand>,
) -> AppResult<impl IntoResponse> {
    input.name = required_name(&input.name)?;
    if let Some(status) = input.status {
        validate_active_flag(status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let brand = BrandRepo::create(&state.pool, &input).await?;
    tracing::info!(brand_id = brand.id, created_by = auth.user_id, "Brand created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: brand })))
}

/// GET /api/brands
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let brands = BrandRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: brands }))
}

/// GET /api/brands/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let brand = BrandRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Brand", id }))?;
    Ok(Json(DataResponse { data: brand }))
}

/// PUT /api/brands/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateBrand>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        input.name = Some(required_name(name)?);
    }
    if let Some(status) = input.status {
        validate_active_flag(status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let brand = BrandRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Brand", id }))?;
    Ok(Json(DataResponse { data: brand }))
}

/// DELETE /api/brands/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !BrandRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Brand", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Trimmed, non-blank catalog name.
pub(crate) fn required_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::MissingFields(vec!["name".into()])));
    }
    Ok(name.to_string())
}
