//! Handlers for the `/campaigns` resource and its pipeline.
//!
//! The ten per-influencer sections share [`update_section`], instantiated
//! once per entry type in the router. Final costs have their own handler
//! because saving them as a draft must not move the stage.

use std::collections::{HashMap, HashSet};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use influx_core::error::CoreError;
use influx_core::pipeline::PipelineStage;
use influx_core::sections::{NegotiationEntry, SectionEntry, ENTRY_COMPLETE, ENTRY_DRAFT};
use influx_core::types::DbId;
use influx_db::models::campaign::{Campaign, CreateCampaign, InfluencerList, UpdateCampaign};
use influx_db::models::influencer::Influencer;
use influx_db::models::negotiation_cost::NegotiationCost;
use influx_db::repositories::{
    CampaignRepo, InfluencerRepo, NegotiationCostRepo, SectionUpdate, StageMove,
};
use influx_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /campaigns/{id}` and `PUT /campaigns/{id}/strategy`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignRequest {
    #[serde(flatten)]
    pub fields: UpdateCampaign,
    pub stage_status: Option<i32>,
}

/// Request body for the influencer list setters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerListRequest {
    pub influencer_ids: Vec<DbId>,
    pub stage_status: Option<i32>,
}

/// Request body shared by every section endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest<T> {
    pub influencers: Vec<T>,
    pub stage_status: Option<i32>,
}

/// Request body for `PUT /campaigns/{id}/final-costs`.
#[derive(Debug, Deserialize)]
pub struct FinalCostsRequest {
    pub influencers: Vec<NegotiationEntry>,
    /// 1 (default) finalises and moves the campaign to Final Costs; 0 saves
    /// a draft.
    pub status: Option<i32>,
}

/// Costs an approved influencer will be paid on a campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalCosts {
    pub reel_cost: Option<f64>,
    pub story_cost: Option<f64>,
    pub post_cost: Option<f64>,
    pub youtube_video_cost: Option<f64>,
    pub youtube_shorts_cost: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedInfluencer {
    #[serde(flatten)]
    pub influencer: Influencer,
    pub final_costs: FinalCosts,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/campaigns
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateCampaign>,
) -> AppResult<(StatusCode, Json<DataResponse<Campaign>>)> {
    let missing: Vec<String> = [("campaignName", &input.campaign_name), ("brand", &input.brand)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::MissingFields(missing)));
    }
    input.created_by = Some(auth.user_id);

    let campaign = CampaignRepo::create(&state.pool, &input).await?;
    tracing::info!(campaign_id = campaign.id, created_by = auth.user_id, "Campaign created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: campaign })))
}

/// GET /api/campaigns
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Campaign>>>> {
    let campaigns = CampaignRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /api/campaigns/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    let campaign = find_campaign(&state.pool, id).await?;
    Ok(Json(DataResponse { data: campaign }))
}

/// PUT /api/campaigns/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaignRequest>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    apply_update(&state.pool, id, input, StageMove::Keep).await
}

/// PUT /api/campaigns/{id}/strategy
///
/// Saving a strategy moves a new campaign to the Strategy stage unless an
/// explicit `stageStatus` is given.
pub async fn update_strategy(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaignRequest>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    apply_update(&state.pool, id, input, StageMove::AtLeast(PipelineStage::Strategy)).await
}

/// DELETE /api/campaigns/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CampaignRepo::delete(&state.pool, id).await? {
        return Err(campaign_not_found(id));
    }
    tracing::info!(campaign_id = id, deleted_by = auth.user_id, "Campaign deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Influencer lists
// ---------------------------------------------------------------------------

/// PUT /api/campaigns/{id}/influencers
pub async fn set_influencers(
    auth: AuthUser,
    state: State<AppState>,
    path: Path<DbId>,
    input: Json<InfluencerListRequest>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    set_list(auth, state, path, input, InfluencerList::Listed).await
}

/// PUT /api/campaigns/{id}/shortlisted
pub async fn set_shortlisted(
    auth: AuthUser,
    state: State<AppState>,
    path: Path<DbId>,
    input: Json<InfluencerListRequest>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    set_list(auth, state, path, input, InfluencerList::Shortlisted).await
}

/// PUT /api/campaigns/{id}/approved
pub async fn set_approved(
    auth: AuthUser,
    state: State<AppState>,
    path: Path<DbId>,
    input: Json<InfluencerListRequest>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    set_list(auth, state, path, input, InfluencerList::Approved).await
}

/// GET /api/campaigns/{id}/influencers
pub async fn get_influencers(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Influencer>>>> {
    let campaign = find_campaign(&state.pool, id).await?;
    let influencers = load_list(&state.pool, &campaign, InfluencerList::Listed).await?;
    Ok(Json(DataResponse { data: influencers }))
}

/// GET /api/campaigns/{id}/shortlisted
pub async fn get_shortlisted(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Influencer>>>> {
    let campaign = find_campaign(&state.pool, id).await?;
    let influencers = load_list(&state.pool, &campaign, InfluencerList::Shortlisted).await?;
    Ok(Json(DataResponse { data: influencers }))
}

/// GET /api/campaigns/{id}/approved
///
/// Approved influencers with the costs they will be paid.
pub async fn get_approved(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ApprovedInfluencer>>>> {
    let campaign = find_campaign(&state.pool, id).await?;
    let influencers = load_list(&state.pool, &campaign, InfluencerList::Approved).await?;

    let ids: Vec<DbId> = influencers.iter().map(|i| i.id).collect();
    let costs: HashMap<DbId, NegotiationCost> =
        NegotiationCostRepo::list_for_influencers(&state.pool, &ids)
            .await?
            .into_iter()
            .map(|c| (c.influencer_id, c))
            .collect();
    let entries: HashMap<DbId, &NegotiationEntry> = campaign
        .negotiation
        .iter()
        .map(|e| (e.influencer_id, e))
        .collect();

    let data = influencers
        .into_iter()
        .map(|influencer| {
            let final_costs = final_costs(
                &influencer,
                costs.get(&influencer.id),
                entries.get(&influencer.id).copied(),
            );
            ApprovedInfluencer {
                influencer,
                final_costs,
            }
        })
        .collect();
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// PUT /api/campaigns/{id}/<section>
///
/// Merge per-influencer entries into one section and optionally move the
/// stage forward. Resubmitting an influencer updates its entry in place.
pub async fn update_section<T: SectionEntry>(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SectionRequest<T>>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    ensure_entries(&input.influencers)?;
    let update = SectionUpdate {
        entries: input.influencers,
        entry_status: ENTRY_COMPLETE,
        stage: input.stage_status.into(),
    };
    let campaign = CampaignRepo::update_section(&state.pool, id, update)
        .await?
        .ok_or(campaign_not_found(id))?;

    tracing::info!(
        campaign_id = id,
        section = T::SECTION.column(),
        stage_status = campaign.stage_status,
        user_id = auth.user_id,
        "Campaign section saved"
    );
    Ok(Json(DataResponse { data: campaign }))
}

/// PUT /api/campaigns/{id}/final-costs
pub async fn update_final_costs(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<FinalCostsRequest>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    ensure_entries(&input.influencers)?;
    let (entry_status, stage) = match input.status.unwrap_or(ENTRY_COMPLETE) {
        ENTRY_COMPLETE => (
            ENTRY_COMPLETE,
            StageMove::AtLeast(PipelineStage::FinalCosts),
        ),
        ENTRY_DRAFT => (ENTRY_DRAFT, StageMove::Keep),
        other => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid status {other}. Must be 0 or 1"
            ))))
        }
    };

    let update = SectionUpdate {
        entries: input.influencers,
        entry_status,
        stage,
    };
    let campaign = CampaignRepo::update_section(&state.pool, id, update)
        .await?
        .ok_or(campaign_not_found(id))?;

    tracing::info!(
        campaign_id = id,
        draft = entry_status == ENTRY_DRAFT,
        stage_status = campaign.stage_status,
        user_id = auth.user_id,
        "Final costs saved"
    );
    Ok(Json(DataResponse { data: campaign }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn apply_update(
    pool: &DbPool,
    id: DbId,
    input: UpdateCampaignRequest,
    default_move: StageMove,
) -> AppResult<Json<DataResponse<Campaign>>> {
    let fields = input.fields;
    for (name, value) in [
        ("campaignName", fields.campaign_name.as_deref()),
        ("brand", fields.brand.as_deref()),
        ("status", fields.status.as_deref()),
    ] {
        if value.is_some_and(|v| v.trim().is_empty()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "{name} cannot be blank"
            ))));
        }
    }
    if let (Some(start), Some(end)) = (fields.start_date, fields.end_date) {
        if end < start {
            return Err(AppError::Core(CoreError::Validation(
                "endDate cannot be before startDate".into(),
            )));
        }
    }

    let stage = input.stage_status.map_or(default_move, StageMove::To);
    let campaign = CampaignRepo::update(pool, id, &fields, stage)
        .await?
        .ok_or(campaign_not_found(id))?;
    Ok(Json(DataResponse { data: campaign }))
}

async fn set_list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<InfluencerListRequest>,
    list: InfluencerList,
) -> AppResult<Json<DataResponse<Campaign>>> {
    let mut ids = input.influencer_ids;
    let mut seen = HashSet::new();
    ids.retain(|influencer_id| seen.insert(*influencer_id));

    let known: HashSet<DbId> = InfluencerRepo::find_many(&state.pool, &ids)
        .await?
        .into_iter()
        .map(|i| i.id)
        .collect();
    let unknown: Vec<String> = ids
        .iter()
        .filter(|influencer_id| !known.contains(*influencer_id))
        .map(|influencer_id| influencer_id.to_string())
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown influencer ids: {}",
            unknown.join(", ")
        ))));
    }

    let campaign =
        CampaignRepo::set_influencer_list(&state.pool, id, list, &ids, input.stage_status.into())
            .await?
            .ok_or(campaign_not_found(id))?;
    tracing::info!(
        campaign_id = id,
        list = list.column(),
        count = ids.len(),
        user_id = auth.user_id,
        "Campaign influencer list saved"
    );
    Ok(Json(DataResponse { data: campaign }))
}

async fn find_campaign(pool: &DbPool, id: DbId) -> AppResult<Campaign> {
    CampaignRepo::find_by_id(pool, id)
        .await?
        .ok_or(campaign_not_found(id))
}

/// Influencers of one list, in list order. Ids whose influencer has since
/// been deleted are skipped.
async fn load_list(
    pool: &DbPool,
    campaign: &Campaign,
    list: InfluencerList,
) -> AppResult<Vec<Influencer>> {
    let ids = list.ids(campaign);
    let mut by_id: HashMap<DbId, Influencer> = InfluencerRepo::find_many(pool, ids)
        .await?
        .into_iter()
        .map(|i| (i.id, i))
        .collect();
    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

/// Per field: the campaign's final-cost entry, then the negotiated cost,
/// then the influencer's list price.
fn final_costs(
    influencer: &Influencer,
    negotiated: Option<&NegotiationCost>,
    entry: Option<&NegotiationEntry>,
) -> FinalCosts {
    FinalCosts {
        reel_cost: entry
            .and_then(|e| e.reel_cost)
            .or(negotiated.and_then(|n| n.reel_cost))
            .or(influencer.reel_cost),
        story_cost: entry.and_then(|e| e.story_cost).or(influencer.story_cost),
        post_cost: entry.and_then(|e| e.post_cost).or(influencer.post_cost),
        youtube_video_cost: entry
            .and_then(|e| e.youtube_video_cost)
            .or(negotiated.and_then(|n| n.youtube_video_cost))
            .or(influencer.youtube_video_cost),
        youtube_shorts_cost: entry
            .and_then(|e| e.youtube_shorts_cost)
            .or(negotiated.and_then(|n| n.youtube_shorts_cost))
            .or(influencer.youtube_shorts_cost),
    }
}

fn ensure_entries<T: SectionEntry>(entries: &[T]) -> AppResult<()> {
    if entries.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "influencers must contain at least one entry".into(),
        )));
    }
    Ok(())
}

fn campaign_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Campaign",
        id,
    })
}
