//! Handlers for the `/influencers` resource.
//!
//! Onboarding and the form invitation are public. Everything else requires a
//! token and is scoped to the influencers the caller onboarded, unless the
//! caller is a super admin.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use chrono::NaiveDate;
use influx_core::error::CoreError;
use influx_core::influencer::{
    missing_required_fields, parse_amount, parse_count, validate_platform_type, validate_status,
    InfluencerFilter, STATUS_APPROVED, STATUS_REJECTED,
};
use influx_core::tiers::tier_label;
use influx_core::types::DbId;
use influx_db::models::influencer::{CreateInfluencer, Influencer, UpdateInfluencer};
use influx_db::models::negotiation_cost::NegotiationCost;
use influx_db::repositories::{InfluencerRepo, InfluencerScope, NegotiationCostRepo, UserRepo};
use influx_db::DbPool;
use influx_notify::{templates, Attachment};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::deliver_email;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, NotifiedResponse};
use crate::spreadsheet::{write_workbook, xlsx_attachment, Cell};
use crate::state::AppState;
use crate::upload::{remove_uploads, save_upload, MultipartForm};

/// Multipart file fields accepted on onboarding.
const FILE_FIELDS: &[&str] = &["panCard", "cancelledCheque", "profilePicture", "mediaKit"];

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// An influencer with its negotiated costs, if any.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerWithCost {
    #[serde(flatten)]
    pub influencer: Influencer,
    pub negotiation_cost: Option<NegotiationCost>,
}

/// Minimal view returned after onboarding.
#[derive(Debug, Serialize)]
pub struct OnboardedInfluencer {
    pub id: DbId,
    pub status: String,
}

/// Request body for `PUT /influencers/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub reason: Option<String>,
}

/// Request body for `POST /influencers/form-email`.
#[derive(Debug, Deserialize, Validate)]
pub struct FormEmailRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// POST /api/influencers/onboard
///
/// Multipart form: the profile fields as text parts plus up to four files
/// (`panCard`, `cancelledCheque`, `profilePicture`, `mediaKit`).
pub async fn onboard(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<NotifiedResponse<OnboardedInfluencer>>)> {
    let form = MultipartForm::collect(multipart).await?;

    let missing = missing_required_fields(&form.fields);
    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::MissingFields(missing)));
    }
    let mut input = onboarding_input(&form)?;
    if let Some(onboarder_id) = input.onboarder_id {
        if UserRepo::find_by_id(&state.pool, onboarder_id).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "onboarderId {onboarder_id} does not match a user"
            ))));
        }
    }

    let upload_dir = &state.config.upload_dir;
    let mut stored: Vec<String> = Vec::new();
    for field in FILE_FIELDS {
        let Some(file) = form.files.get(*field) else {
            continue;
        };
        match save_upload(upload_dir, field, file).await {
            Ok(name) => {
                stored.push(name.clone());
                match *field {
                    "panCard" => input.pan_card_file = Some(name),
                    "cancelledCheque" => input.cancelled_cheque_file = Some(name),
                    "profilePicture" => input.profile_picture = Some(name),
                    _ => input.media_kit_file = Some(name),
                }
            }
            Err(e) => {
                remove_uploads(upload_dir, stored.iter().map(String::as_str)).await;
                return Err(e);
            }
        }
    }

    let influencer = match InfluencerRepo::create(&state.pool, &input).await {
        Ok(influencer) => influencer,
        Err(e) => {
            remove_uploads(upload_dir, stored.iter().map(String::as_str)).await;
            return Err(e.into());
        }
    };
    tracing::info!(
        influencer_id = influencer.id,
        onboarder_id = ?influencer.onboarder_id,
        files = stored.len(),
        "Influencer onboarded"
    );

    let email_sent = deliver_email(
        state.notifier.as_ref(),
        templates::onboarding_confirmation(&influencer.email, &influencer.name),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(NotifiedResponse {
            data: OnboardedInfluencer {
                id: influencer.id,
                status: influencer.status,
            },
            email_sent,
        }),
    ))
}

/// POST /api/influencers/form-email
///
/// Email the onboarding form link, attaching the configured PDF when it is
/// present on disk.
pub async fn send_form_email(
    State(state): State<AppState>,
    Json(input): Json<FormEmailRequest>,
) -> AppResult<Json<NotifiedResponse<String>>> {
    input.validate()?;

    let attachment = match &state.config.form_pdf_path {
        Some(path) => match tokio::fs::read(path).await {
            Ok(bytes) => Some(Attachment {
                filename: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "onboarding-form.pdf".into()),
                content_type: "application/pdf".into(),
                bytes,
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Form PDF not readable, sending without attachment");
                None
            }
        },
        None => None,
    };

    let email_sent = deliver_email(
        state.notifier.as_ref(),
        templates::form_invitation(&input.email, &input.name, &state.config.form_url, attachment),
    )
    .await;

    Ok(Json(NotifiedResponse {
        data: input.email,
        email_sent,
    }))
}

// ---------------------------------------------------------------------------
// Authenticated handlers
// ---------------------------------------------------------------------------

/// GET /api/influencers
///
/// Non-Barter influencers visible to the caller, each with its negotiated
/// costs.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<InfluencerWithCost>>>> {
    let influencers = InfluencerRepo::list(&state.pool, scope_for(&auth), false).await?;
    let data = with_costs(&state.pool, influencers).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/influencers/barter
pub async fn list_barter(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<InfluencerWithCost>>>> {
    let influencers = InfluencerRepo::list(&state.pool, scope_for(&auth), true).await?;
    let data = with_costs(&state.pool, influencers).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/influencers/export
pub async fn export_all(auth: AuthUser, State(state): State<AppState>) -> AppResult<Response> {
    let influencers = InfluencerRepo::list(&state.pool, scope_for(&auth), false).await?;
    let rows = with_costs(&state.pool, influencers).await?;
    tracing::info!(user_id = auth.user_id, rows = rows.len(), "Exporting influencers");
    let bytes = write_workbook("Influencers", EXPORT_HEADERS, &export_rows(&rows))?;
    Ok(xlsx_attachment("influencers.xlsx", bytes))
}

/// GET /api/influencers/export/filtered
///
/// Same rows as the full export, narrowed by the query-string filter.
pub async fn export_filtered(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<InfluencerFilter>,
) -> AppResult<Response> {
    let influencers: Vec<Influencer> =
        InfluencerRepo::list(&state.pool, scope_for(&auth), false)
            .await?
            .into_iter()
            .filter(|i| filter.matches(&i.filter_candidate()))
            .collect();
    let rows = with_costs(&state.pool, influencers).await?;
    tracing::info!(
        user_id = auth.user_id,
        rows = rows.len(),
        ?filter,
        "Exporting filtered influencers"
    );
    let bytes = write_workbook("Influencers", EXPORT_HEADERS, &export_rows(&rows))?;
    Ok(xlsx_attachment("influencers-filtered.xlsx", bytes))
}

/// GET /api/influencers/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<InfluencerWithCost>>> {
    let influencer = find_visible(&state.pool, &auth, id).await?;
    let negotiation_cost = NegotiationCostRepo::find_by_influencer(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: InfluencerWithCost {
            influencer,
            negotiation_cost,
        },
    }))
}

/// PUT /api/influencers/{id}
///
/// Tiers are re-derived whenever a follower count is supplied.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateInfluencer>,
) -> AppResult<Json<DataResponse<Influencer>>> {
    find_visible(&state.pool, &auth, id).await?;

    if let Some(platform_type) = &input.platform_type {
        validate_platform_type(platform_type)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    let counters = [
        ("instagramFollowers", input.instagram_followers),
        ("instagramReach", input.instagram_reach),
        ("instagramViews", input.instagram_views),
        ("instagramLikes", input.instagram_likes),
        ("instagramComments", input.instagram_comments),
        ("instagramShares", input.instagram_shares),
        ("instagramSaves", input.instagram_saves),
        ("youtubeSubscribers", input.youtube_subscribers),
        ("youtubeReach", input.youtube_reach),
        ("youtubeViews", input.youtube_views),
        ("youtubeLikes", input.youtube_likes),
        ("youtubeComments", input.youtube_comments),
        ("youtubeShares", input.youtube_shares),
    ];
    if let Some((name, _)) = counters.iter().find(|(_, v)| v.is_some_and(|n| n < 0)) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{name} cannot be negative"
        ))));
    }
    if input.instagram_followers.is_some() {
        input.instagram_tier = Some(tier_label(input.instagram_followers));
    }
    if input.youtube_subscribers.is_some() {
        input.youtube_tier = Some(tier_label(input.youtube_subscribers));
    }

    let influencer = InfluencerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Influencer",
            id,
        }))?;
    Ok(Json(DataResponse { data: influencer }))
}

/// PUT /api/influencers/{id}/status
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<NotifiedResponse<OnboardedInfluencer>>> {
    validate_status(&input.status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    find_visible(&state.pool, &auth, id).await?;

    let reason = input
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty() && input.status == STATUS_REJECTED);
    let influencer = InfluencerRepo::update_status(&state.pool, id, &input.status, reason)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Influencer",
            id,
        }))?;
    tracing::info!(influencer_id = id, status = %influencer.status, reviewed_by = auth.user_id, "Influencer status updated");

    let message = match influencer.status.as_str() {
        STATUS_APPROVED => Some(templates::approval(&influencer.email, &influencer.name)),
        STATUS_REJECTED => Some(templates::rejection(
            &influencer.email,
            &influencer.name,
            influencer.rejection_reason.as_deref(),
        )),
        _ => None,
    };
    let email_sent = match message {
        Some(message) => deliver_email(state.notifier.as_ref(), message).await,
        None => false,
    };

    Ok(Json(NotifiedResponse {
        data: OnboardedInfluencer {
            id: influencer.id,
            status: influencer.status,
        },
        email_sent,
    }))
}

/// DELETE /api/influencers/{id}
///
/// Removes the row, its negotiated costs and its stored files.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_visible(&state.pool, &auth, id).await?;
    let removed = InfluencerRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Influencer",
            id,
        }))?;

    let files = [
        removed.pan_card_file.as_deref(),
        removed.cancelled_cheque_file.as_deref(),
        removed.profile_picture.as_deref(),
        removed.media_kit_file.as_deref(),
    ];
    remove_uploads(&state.config.upload_dir, files.into_iter().flatten()).await;

    tracing::info!(influencer_id = id, deleted_by = auth.user_id, "Influencer deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Which influencers the caller may see.
pub(crate) fn scope_for(auth: &AuthUser) -> InfluencerScope {
    match auth.owner_filter() {
        None => InfluencerScope::All,
        Some(user_id) => InfluencerScope::OnboardedBy(user_id),
    }
}

/// Load an influencer, 404 when missing, 403 when owned by someone else.
async fn find_visible(pool: &DbPool, auth: &AuthUser, id: DbId) -> AppResult<Influencer> {
    let influencer = InfluencerRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Influencer",
            id,
        }))?;
    if let Some(user_id) = auth.owner_filter() {
        if influencer.onboarder_id != Some(user_id) {
            return Err(AppError::Core(CoreError::Forbidden(
                "You can only access influencers you onboarded".into(),
            )));
        }
    }
    Ok(influencer)
}

/// Attach each influencer's negotiated costs through an id-keyed map.
pub(crate) async fn with_costs(
    pool: &DbPool,
    influencers: Vec<Influencer>,
) -> AppResult<Vec<InfluencerWithCost>> {
    let ids: Vec<DbId> = influencers.iter().map(|i| i.id).collect();
    let mut costs: HashMap<DbId, NegotiationCost> =
        NegotiationCostRepo::list_for_influencers(pool, &ids)
            .await?
            .into_iter()
            .map(|c| (c.influencer_id, c))
            .collect();

    Ok(influencers
        .into_iter()
        .map(|influencer| InfluencerWithCost {
            negotiation_cost: costs.remove(&influencer.id),
            influencer,
        })
        .collect())
}

/// Build the insert DTO from validated onboarding fields.
fn onboarding_input(form: &MultipartForm) -> AppResult<CreateInfluencer> {
    let required = |name: &str| form.text(name).unwrap_or_default();
    let count = |name: &str| {
        parse_count(form.fields.get(name).map(String::as_str))
            .map_err(|msg| AppError::Core(CoreError::Validation(format!("{name}: {msg}"))))
    };
    let amount = |name: &str| {
        parse_amount(form.fields.get(name).map(String::as_str))
            .map_err(|msg| AppError::Core(CoreError::Validation(format!("{name}: {msg}"))))
    };

    let platform_type = required("platformType");
    validate_platform_type(&platform_type)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let date_of_birth = form
        .text("dateOfBirth")
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                AppError::Core(CoreError::Validation(
                    "dateOfBirth must be formatted YYYY-MM-DD".into(),
                ))
            })
        })
        .transpose()?;

    let onboarder_id = form
        .text("onboarderId")
        .map(|raw| {
            raw.parse::<DbId>().map_err(|_| {
                AppError::Core(CoreError::Validation("onboarderId must be numeric".into()))
            })
        })
        .transpose()?;

    let instagram_followers = count("instagramFollowers")?;
    let youtube_subscribers = count("youtubeSubscribers")?;

    Ok(CreateInfluencer {
        name: required("name"),
        email: required("email"),
        mobile: required("mobile"),
        gender: form.text("gender"),
        date_of_birth,
        city: required("city"),
        state: required("state"),
        country: form.text("country"),
        address: form.text("address"),
        pincode: form.text("pincode"),
        languages: form.text("languages"),
        category: required("category"),

        instagram_username: form.text("instagramUsername"),
        instagram_link: form.text("instagramLink"),
        instagram_followers,
        instagram_tier: tier_label(instagram_followers),
        instagram_reach: count("instagramReach")?,
        instagram_views: count("instagramViews")?,
        instagram_likes: count("instagramLikes")?,
        instagram_comments: count("instagramComments")?,
        instagram_shares: count("instagramShares")?,
        instagram_saves: count("instagramSaves")?,

        youtube_channel_name: form.text("youtubeChannelName"),
        youtube_link: form.text("youtubeLink"),
        youtube_subscribers,
        youtube_tier: tier_label(youtube_subscribers),
        youtube_reach: count("youtubeReach")?,
        youtube_views: count("youtubeViews")?,
        youtube_likes: count("youtubeLikes")?,
        youtube_comments: count("youtubeComments")?,
        youtube_shares: count("youtubeShares")?,

        platform_type,
        reel_cost: amount("reelCost")?,
        story_cost: amount("storyCost")?,
        post_cost: amount("postCost")?,
        youtube_video_cost: amount("youtubeVideoCost")?,
        youtube_shorts_cost: amount("youtubeShortsCost")?,

        pan_number: required("panNumber").to_uppercase(),
        gst_number: form.text("gstNumber"),
        bank_account_name: required("bankAccountName"),
        bank_account_number: required("bankAccountNumber"),
        bank_name: form.text("bankName"),
        ifsc_code: required("ifscCode").to_uppercase(),
        upi_id: form.text("upiId"),

        pan_card_file: None,
        cancelled_cheque_file: None,
        profile_picture: None,
        media_kit_file: None,

        onboarder_id,
    })
}

// ---------------------------------------------------------------------------
// Export layout
// ---------------------------------------------------------------------------

const EXPORT_HEADERS: &[&str] = &[
    "ID",
    "Name",
    "Email",
    "Mobile",
    "City",
    "State",
    "Category",
    "Platform Type",
    "Instagram Username",
    "Instagram Followers",
    "Instagram Tier",
    "Instagram Engagement Rate (%)",
    "Instagram Avg Views",
    "YouTube Channel",
    "YouTube Subscribers",
    "YouTube Tier",
    "YouTube Engagement Rate (%)",
    "YouTube Avg Views",
    "Reel Cost",
    "Story Cost",
    "Post Cost",
    "YouTube Video Cost",
    "YouTube Shorts Cost",
    "Negotiated Reel Cost",
    "Negotiated YouTube Video Cost",
    "Negotiated YouTube Shorts Cost",
    "Status",
    "Onboarded On",
];

fn export_rows(rows: &[InfluencerWithCost]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|row| {
            let i = &row.influencer;
            let cost = row.negotiation_cost.as_ref();
            let instagram = i.instagram_metrics();
            let youtube = i.youtube_metrics();
            vec![
                Some(i.id).into(),
                i.name.as_str().into(),
                i.email.as_str().into(),
                i.mobile.as_str().into(),
                i.city.as_str().into(),
                i.state.as_str().into(),
                i.category.as_str().into(),
                i.platform_type.as_str().into(),
                i.instagram_username.clone().into(),
                i.instagram_followers.into(),
                i.instagram_tier.as_str().into(),
                instagram.engagement_rate().map(round2).into(),
                instagram.average_views().map(round2).into(),
                i.youtube_channel_name.clone().into(),
                i.youtube_subscribers.into(),
                i.youtube_tier.as_str().into(),
                youtube.engagement_rate().map(round2).into(),
                youtube.average_views().map(round2).into(),
                i.reel_cost.into(),
                i.story_cost.into(),
                i.post_cost.into(),
                i.youtube_video_cost.into(),
                i.youtube_shorts_cost.into(),
                cost.and_then(|c| c.reel_cost).into(),
                cost.and_then(|c| c.youtube_video_cost).into(),
                cost.and_then(|c| c.youtube_shorts_cost).into(),
                i.status.as_str().into(),
                i.created_at.format("%Y-%m-%d").to_string().into(),
            ]
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> MultipartForm {
        MultipartForm {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: HashMap::new(),
        }
    }

    fn complete() -> Vec<(&'static str, &'static str)> {
        vec![
            ("name", "Asha Rao"),
            ("email", "asha@example.com"),
            ("mobile", "9876543210"),
            ("city", "Pune"),
            ("state", "MH"),
            ("category", "Fashion"),
            ("platformType", "Paid"),
            ("panNumber", "abcde1234f"),
            ("bankAccountName", "Asha Rao"),
            ("bankAccountNumber", "00112233"),
            ("ifscCode", "hdfc0001"),
        ]
    }

    #[test]
    fn onboarding_input_derives_tiers() {
        let mut fields = complete();
        fields.push(("instagramFollowers", "12,000"));
        let input = onboarding_input(&form(&fields)).unwrap();
        assert_eq!(input.instagram_followers, Some(12_000));
        assert_eq!(input.instagram_tier, "Micro");
        assert_eq!(input.youtube_tier, "-");
        assert_eq!(input.pan_number, "ABCDE1234F");
        assert_eq!(input.onboarder_id, None);
    }

    #[test]
    fn onboarding_input_rejects_unknown_platform_type() {
        let mut fields = complete();
        fields.retain(|(k, _)| *k != "platformType");
        fields.push(("platformType", "Affiliate"));
        assert!(onboarding_input(&form(&fields)).is_err());
    }

    #[test]
    fn onboarding_input_rejects_bad_numbers() {
        let mut fields = complete();
        fields.push(("youtubeSubscribers", "many"));
        let err = onboarding_input(&form(&fields)).unwrap_err();
        assert!(err.to_string().contains("youtubeSubscribers"));
    }

    #[test]
    fn onboarding_input_reads_onboarder_and_birth_date() {
        let mut fields = complete();
        fields.push(("onboarderId", "7"));
        fields.push(("dateOfBirth", "1996-04-21"));
        let input = onboarding_input(&form(&fields)).unwrap();
        assert_eq!(input.onboarder_id, Some(7));
        assert_eq!(input.date_of_birth, NaiveDate::from_ymd_opt(1996, 4, 21));
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(10.0), 10.0);
    }
}
