//! Integration tests for lead import, triage and assignment.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin, body_json, get_auth, multipart_request, onboard, put_json_auth, send_request,
    super_admin, FilePart, TestApp,
};
use influx_api::spreadsheet::{write_workbook, Cell};
use serde_json::json;
use sqlx::PgPool;

const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn lead_sheet(usernames: &[&str]) -> Vec<u8> {
    let rows: Vec<Vec<Cell>> = usernames
        .iter()
        .map(|name| {
            vec![
                Cell::from(*name),
                Cell::from(format!("https://instagram.com/{name}")),
                Cell::from("Instagram"),
                Cell::Number(12_500.0),
            ]
        })
        .collect();
    write_workbook(
        "Leads",
        &["Username", "Profile Link", "Platform", "Followers"],
        &rows,
    )
    .expect("workbook")
}

async fn import(test: &TestApp, token: &str, usernames: &[&str]) -> Vec<i64> {
    let bytes = lead_sheet(usernames);
    let files = [FilePart {
        field: "file",
        filename: "leads.xlsx",
        content_type: XLSX,
        bytes: &bytes,
    }];
    let request = multipart_request(
        Method::POST,
        "/api/existing-influencers/upload",
        Some(token),
        &[],
        &files,
    );
    let response = send_request(test.app(), request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["insertedCount"], usernames.len());
    json["data"]["leads"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_i64().unwrap())
        .collect()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_imports_rows_and_removes_staged_file(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_root, token) = super_admin(&test).await;

    let ids = import(&test, &token, &["alpha", "beta", "gamma"]).await;
    assert_eq!(ids.len(), 3);

    let json = body_json(get_auth(test.app(), "/api/existing-influencers", &token).await).await;
    let lead = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["username"] == "alpha")
        .cloned()
        .unwrap();
    assert_eq!(lead["followers"], 12_500);
    assert_eq!(lead["status"], "pending");

    let leftover = std::fs::read_dir(test.upload_dir.path()).unwrap().count();
    assert_eq!(leftover, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unreadable_spreadsheet_is_400_and_staged_file_removed(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_root, token) = super_admin(&test).await;
    let files = [FilePart {
        field: "file",
        filename: "leads.xlsx",
        content_type: XLSX,
        bytes: b"not a workbook",
    }];
    let request = multipart_request(
        Method::POST,
        "/api/existing-influencers/upload",
        Some(&token),
        &[],
        &files,
    );

    let response = send_request(test.app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let leftover = std::fs::read_dir(test.upload_dir.path()).unwrap().count();
    assert_eq!(leftover, 0);
    let json = body_json(get_auth(test.app(), "/api/existing-influencers", &token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_without_file_is_400(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_root, token) = super_admin(&test).await;

    let request = multipart_request(
        Method::POST,
        "/api/existing-influencers/upload",
        Some(&token),
        &[("note", "no file")],
        &[],
    );
    let response = send_request(test.app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_assign_reports_modified_count_and_scopes_listing(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_root, root_token) = super_admin(&test).await;
    let (alice, alice_token) = admin(&test, "alice").await;

    let ids = import(&test, &root_token, &["one", "two", "three"]).await;

    let body = json!({ "ids": [ids[0], ids[1]], "assignedTo": alice.id });
    let response = put_json_auth(
        test.app(),
        "/api/existing-influencers/bulk-assign",
        body,
        &root_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["modifiedCount"], 2);

    let json =
        body_json(get_auth(test.app(), "/api/existing-influencers", &alice_token).await).await;
    let leads = json["data"].as_array().unwrap();
    assert_eq!(leads.len(), 2);
    assert!(leads.iter().all(|l| l["assignedTo"] == alice.id));
    assert!(leads.iter().all(|l| l["status"] == "assigned"));
    assert!(leads.iter().all(|l| l["assignStatus"] == "assigned"));

    let uri = format!("/api/existing-influencers/{}", ids[2]);
    let response = get_auth(test.app(), &uri, &alice_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_assign_to_unknown_user_is_404(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_root, token) = super_admin(&test).await;
    let ids = import(&test, &token, &["one"]).await;

    let body = json!({ "ids": ids, "assignedTo": 999_999 });
    let response = put_json_auth(
        test.app(),
        "/api/existing-influencers/bulk-assign",
        body,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assigning_without_assignee_takes_the_lead(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (root, token) = super_admin(&test).await;
    let ids = import(&test, &token, &["solo"]).await;

    let uri = format!("/api/existing-influencers/{}/status", ids[0]);
    let response = put_json_auth(test.app(), &uri, json!({ "status": "assigned" }), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "assigned");
    assert_eq!(json["data"]["assignedTo"], root.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn link_form_records_onboarded_influencer(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_root, token) = super_admin(&test).await;
    let ids = import(&test, &token, &["linked"]).await;
    let influencer = onboard(&test, "Linked", "linked@example.com", None).await;

    let uri = format!("/api/existing-influencers/{}/link-form", ids[0]);
    let response = put_json_auth(
        test.app(),
        &uri,
        json!({ "influencerId": influencer }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["influencerFormId"], influencer);

    let response = put_json_auth(test.app(), &uri, json!({ "influencerId": 999_999 }), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
