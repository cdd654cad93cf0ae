//! Handlers for `/negotiation-cost` and `/negotiation`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use influx_core::error::CoreError;
use influx_core::influencer::{NEGOTIATION_DONE, NEGOTIATION_PENDING};
use influx_core::types::DbId;
use influx_db::models::negotiation_cost::{NegotiationCost, UpsertNegotiationCost};
use influx_db::repositories::{InfluencerRepo, NegotiationCostRepo};
use serde::Deserialize;

use super::influencers::{scope_for, with_costs, InfluencerWithCost};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /negotiation-cost`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationCostRequest {
    pub influencer_id: DbId,
    pub reel_cost: Option<f64>,
    pub youtube_video_cost: Option<f64>,
    #[serde(alias = "youtubeShortsCoast")]
    pub youtube_shorts_cost: Option<f64>,
    pub status: Option<i32>,
}

/// Query for `GET /negotiation`.
#[derive(Debug, Deserialize)]
pub struct NegotiationQuery {
    pub status: Option<i32>,
}

/// POST /api/negotiation-cost
///
/// Create or replace an influencer's negotiated costs and mark the
/// influencer as negotiated.
pub async fn upsert_cost(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<NegotiationCostRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<NegotiationCost>>)> {
    let costs = [input.reel_cost, input.youtube_video_cost, input.youtube_shorts_cost];
    if costs.iter().flatten().any(|c| *c < 0.0) {
        return Err(AppError::Core(CoreError::Validation(
            "Costs cannot be negative".into(),
        )));
    }
    let status = input.status.unwrap_or(1);
    if !(0..=1).contains(&status) {
        return Err(AppError::Core(CoreError::Validation(
            "status must be 0 or 1".into(),
        )));
    }

    let cost = NegotiationCostRepo::upsert(
        &state.pool,
        &UpsertNegotiationCost {
            influencer_id: input.influencer_id,
            reel_cost: input.reel_cost,
            youtube_video_cost: input.youtube_video_cost,
            youtube_shorts_cost: input.youtube_shorts_cost,
            status,
            created_by: Some(auth.user_id),
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Influencer",
        id: input.influencer_id,
    }))?;

    tracing::info!(
        influencer_id = cost.influencer_id,
        created_by = auth.user_id,
        "Negotiation cost saved"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: cost })))
}

/// GET /api/negotiation-cost/{influencer_id}
pub async fn get_cost(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(influencer_id): Path<DbId>,
) -> AppResult<Json<DataResponse<NegotiationCost>>> {
    let cost = NegotiationCostRepo::find_by_influencer(&state.pool, influencer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "NegotiationCost",
            id: influencer_id,
        }))?;
    Ok(Json(DataResponse { data: cost }))
}

/// DELETE /api/negotiation-cost/{influencer_id}
///
/// Also resets the influencer's negotiation flag.
pub async fn delete_cost(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(influencer_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NegotiationCostRepo::delete_for_influencer(&state.pool, influencer_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "NegotiationCost",
            id: influencer_id,
        }));
    }
    tracing::info!(influencer_id, deleted_by = auth.user_id, "Negotiation cost deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/negotiation?status=0|1
///
/// Non-Barter influencers visible to the caller, optionally narrowed to
/// those still awaiting negotiation (0) or already negotiated (1).
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<NegotiationQuery>,
) -> AppResult<Json<DataResponse<Vec<InfluencerWithCost>>>> {
    if let Some(status) = query.status {
        if status != NEGOTIATION_PENDING && status != NEGOTIATION_DONE {
            return Err(AppError::Core(CoreError::Validation(
                "status must be 0 or 1".into(),
            )));
        }
    }

    let influencers = InfluencerRepo::list(&state.pool, scope_for(&auth), false)
        .await?
        .into_iter()
        .filter(|i| query.status.map_or(true, |s| i.negotiation_status == s))
        .collect();
    let data = with_costs(&state.pool, influencers).await?;
    Ok(Json(DataResponse { data }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misspelt_shorts_cost_is_accepted() {
        let req: NegotiationCostRequest = serde_json::from_str(
            r#"{"influencerId": 4, "reelCost": 5000, "youtubeShortsCoast": 1200}"#,
        )
        .unwrap();
        assert_eq!(req.youtube_shorts_cost, Some(1200.0));
        assert_eq!(req.status, None);
    }

    #[test]
    fn correct_spelling_still_works() {
        let req: NegotiationCostRequest =
            serde_json::from_str(r#"{"influencerId": 4, "youtubeShortsCost": 900, "status": 0}"#)
                .unwrap();
        assert_eq!(req.youtube_shorts_cost, Some(900.0));
        assert_eq!(req.status, Some(0));
    }
}
