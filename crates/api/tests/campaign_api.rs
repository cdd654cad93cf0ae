//! Integration tests for the campaign pipeline: lists, sections, stage
//! progression and final costs.

mod common;

use axum::http::StatusCode;
use common::{admin, body_json, get_auth, onboard, post_json_auth, put_json_auth, TestApp};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_campaign(test: &TestApp, token: &str) -> i64 {
    let body = json!({ "campaignName": "Summer Launch", "brand": "Acme", "product": "Sunscreen" });
    let response = post_json_auth(test.app(), "/api/campaigns", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["stageStatus"], 0);
    json["data"]["id"].as_i64().unwrap()
}

async fn put(test: &TestApp, token: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = put_json_auth(test.app(), uri, body, token).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_campaign_name_is_rejected(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;

    let body = json!({ "campaignName": "  ", "brand": "Acme" });
    let response = post_json_auth(test.app(), "/api/campaigns", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["missingFields"], json!(["campaignName"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn strategy_moves_campaign_to_strategy_stage(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;

    let body = json!({ "objective": "Awareness", "platforms": ["instagram"], "budget": 250000.0 });
    let (status, json) = put(&test, &token, &format!("/api/campaigns/{id}/strategy"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["stageStatus"], 1);
    assert_eq!(json["data"]["objective"], "Awareness");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn end_date_before_start_date_is_400(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;

    let body = json!({ "startDate": "2026-06-10", "endDate": "2026-06-01" });
    let (status, _) = put(&test, &token, &format!("/api/campaigns/{id}"), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn influencer_lists_dedupe_and_reject_unknown_ids(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;
    let a = onboard(&test, "Asha", "asha@example.com", None).await;
    let b = onboard(&test, "Ravi", "ravi@example.com", None).await;

    let uri = format!("/api/campaigns/{id}/influencers");
    let (status, json) = put(
        &test,
        &token,
        &uri,
        json!({ "influencerIds": [b, a, b], "stageStatus": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["influencerList"], json!([b, a]));
    assert_eq!(json["data"]["stageStatus"], 2);

    let json = body_json(get_auth(test.app(), &uri, &token).await).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![b, a]);

    let (status, _) = put(&test, &token, &uri, json!({ "influencerIds": [a, 999_999] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn resubmitting_a_section_entry_updates_in_place(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;
    let influencer = onboard(&test, "Asha", "asha@example.com", None).await;
    let uri = format!("/api/campaigns/{id}/empanelment");

    let first = json!({
        "influencers": [{ "influencerId": influencer, "agreementSigned": false, "remarks": "sent" }],
        "stageStatus": 5,
    });
    let (status, _) = put(&test, &token, &uri, first).await;
    assert_eq!(status, StatusCode::OK);

    let second = json!({
        "influencers": [{ "influencerId": influencer, "agreementSigned": true }],
    });
    let (status, json) = put(&test, &token, &uri, second).await;
    assert_eq!(status, StatusCode::OK);

    let entries = json["data"]["empanelment"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["agreementSigned"], true);
    assert_eq!(entries[0]["remarks"], "sent");
    assert_eq!(entries[0]["status"], 1);
    assert_eq!(json["data"]["stageStatus"], 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn moving_stage_backwards_is_rejected_and_nothing_is_saved(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;
    let influencer = onboard(&test, "Asha", "asha@example.com", None).await;

    let body = json!({
        "influencers": [{ "influencerId": influencer, "poNumber": "PO-1" }],
        "stageStatus": 7,
    });
    let (status, _) = put(&test, &token, &format!("/api/campaigns/{id}/po-dispatch"), body).await;
    assert_eq!(status, StatusCode::OK);

    let body = json!({
        "influencers": [{ "influencerId": influencer, "amount": 1000.0 }],
        "stageStatus": 6,
    });
    let (status, json) =
        put(&test, &token, &format!("/api/campaigns/{id}/budget-release"), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let json = body_json(get_auth(test.app(), &format!("/api/campaigns/{id}"), &token).await).await;
    assert_eq!(json["data"]["stageStatus"], 7);
    assert_eq!(json["data"]["budgetRelease"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_section_payload_is_400(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;

    let uri = format!("/api/campaigns/{id}/logistics-tracking");
    let (status, _) = put(&test, &token, &uri, json!({ "influencers": [] })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn section_on_missing_campaign_is_404(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;

    let body = json!({ "influencers": [{ "influencerId": 1, "contentLink": "https://x" }] });
    let (status, _) = put(&test, &token, "/api/campaigns/999999/content-section", body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Final costs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn final_costs_draft_keeps_stage(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;
    let influencer = onboard(&test, "Asha", "asha@example.com", None).await;

    let body = json!({
        "influencers": [{ "influencerId": influencer, "reelCost": 4000.0 }],
        "status": 0,
    });
    let (status, json) = put(&test, &token, &format!("/api/campaigns/{id}/final-costs"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["stageStatus"], 0);
    assert_eq!(json["data"]["negotiation"][0]["status"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn final_costs_finalised_moves_to_final_costs_stage(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;
    let influencer = onboard(&test, "Asha", "asha@example.com", None).await;

    let body = json!({
        "influencers": [{ "influencerId": influencer, "reelCost": 4000.0 }],
        "status": 1,
    });
    let (status, json) = put(&test, &token, &format!("/api/campaigns/{id}/final-costs"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["stageStatus"], 8);
    assert_eq!(json["data"]["negotiation"][0]["status"], 1);

    let body = json!({
        "influencers": [{ "influencerId": influencer }],
        "status": 2,
    });
    let (status, _) = put(&test, &token, &format!("/api/campaigns/{id}/final-costs"), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approved_influencers_carry_resolved_final_costs(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;
    // Listed reel price is 5000 from onboarding.
    let influencer = onboard(&test, "Asha", "asha@example.com", None).await;

    let body = json!({ "influencerId": influencer, "reelCost": 4500.0, "youtubeVideoCost": 9000.0 });
    let response = post_json_auth(test.app(), "/api/negotiation-cost", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/campaigns/{id}/approved");
    let (status, _) = put(&test, &token, &uri, json!({ "influencerIds": [influencer] })).await;
    assert_eq!(status, StatusCode::OK);

    let json = body_json(get_auth(test.app(), &uri, &token).await).await;
    let costs = &json["data"][0]["finalCosts"];
    assert_eq!(costs["reelCost"], 4500.0);
    assert_eq!(costs["youtubeVideoCost"], 9000.0);

    let body = json!({ "influencers": [{ "influencerId": influencer, "reelCost": 4200.0 }] });
    put(&test, &token, &format!("/api/campaigns/{id}/final-costs"), body).await;

    let json = body_json(get_auth(test.app(), &uri, &token).await).await;
    let costs = &json["data"][0]["finalCosts"];
    assert_eq!(costs["reelCost"], 4200.0);
    assert_eq!(costs["youtubeVideoCost"], 9000.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn final_costs_without_status_moves_to_final_costs_stage(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;
    let influencer = onboard(&test, "Asha", "asha@example.com", None).await;

    let body = json!({ "influencers": [{ "influencerId": influencer, "reelCost": 4000.0 }] });
    let (status, json) = put(&test, &token, &format!("/api/campaigns/{id}/final-costs"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["stageStatus"], 8);
    assert_eq!(json["data"]["negotiation"][0]["status"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn final_costs_draft_leaves_advanced_stage_untouched(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;
    let influencer = onboard(&test, "Asha", "asha@example.com", None).await;

    let body = json!({
        "influencers": [{ "influencerId": influencer, "agreementSigned": true }],
        "stageStatus": 5,
    });
    let (status, _) = put(&test, &token, &format!("/api/campaigns/{id}/empanelment"), body).await;
    assert_eq!(status, StatusCode::OK);

    let body = json!({
        "influencers": [{ "influencerId": influencer, "reelCost": 4000.0 }],
        "status": 0,
    });
    let (status, json) = put(&test, &token, &format!("/api/campaigns/{id}/final-costs"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["stageStatus"], 5);
    assert_eq!(json["data"]["negotiation"][0]["reelCost"], 4000.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_section_updates_keep_one_entry_per_influencer(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "planner").await;
    let id = create_campaign(&test, &token).await;
    let influencer = onboard(&test, "Asha", "asha@example.com", None).await;
    let uri = format!("/api/campaigns/{id}/empanelment");

    let first = json!({ "influencers": [{ "influencerId": influencer, "remarks": "first" }] });
    let second = json!({ "influencers": [{ "influencerId": influencer, "agreementSigned": true }] });
    let (a, b) = tokio::join!(
        put_json_auth(test.app(), &uri, first, &token),
        put_json_auth(test.app(), &uri, second, &token),
    );
    assert_eq!(a.status(), StatusCode::OK);
    assert_eq!(b.status(), StatusCode::OK);

    let json = body_json(get_auth(test.app(), &format!("/api/campaigns/{id}"), &token).await).await;
    let entries = json["data"]["empanelment"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["remarks"], "first");
    assert_eq!(entries[0]["agreementSigned"], true);
}
