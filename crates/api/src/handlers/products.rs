//! Handlers for the `/products` catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use influx_core::catalog::validate_active_flag;
use influx_core::error::CoreError;
use influx_core::types::DbId;
use influx_db::models::product::{CreateProduct, UpdateProduct};
use influx_db::repositories::{BrandRepo, ProductRepo};
use influx_db::DbPool;
use serde::Deserialize;

use super::brands::required_name;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query for `GET /products`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub brand_id: Option<DbId>,
}

/// POST /api/products
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    input.name = required_name(&input.name)?;
    if let Some(status) = input.status {
        validate_active_flag(status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if let Some(brand_id) = input.brand_id {
        ensure_brand_exists(&state.pool, brand_id).await?;
    }

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(product_id = product.id, created_by = auth.user_id, "Product created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/products?brandId=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list(&state.pool, query.brand_id).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Product", id }))?;
    Ok(Json(DataResponse { data: product }))
}

/// PUT /api/products/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        input.name = Some(required_name(name)?);
    }
    if let Some(status) = input.status {
        validate_active_flag(status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if let Some(brand_id) = input.brand_id {
        ensure_brand_exists(&state.pool, brand_id).await?;
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Product", id }))?;
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/products/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ProductRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Product", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_brand_exists(pool: &DbPool, brand_id: DbId) -> AppResult<()> {
    BrandRepo::find_by_id(pool, brand_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Brand",
            id: brand_id,
        }))?;
    Ok(())
}
