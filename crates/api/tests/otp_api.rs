//! Integration tests for mobile OTP issue and verification.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use influx_core::otp::OTP_MAX_ATTEMPTS;
use serde_json::json;
use sqlx::PgPool;

fn code_from(message: &str) -> String {
    message.chars().take_while(char::is_ascii_digit).collect()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sent_code_verifies_once(pool: PgPool) {
    let test = common::build_test_app(pool);

    let response = post_json(test.app(), "/api/otp/send", json!({ "mobile": "9876543210" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["sent"], true);

    let (mobile, message) = test.last_sms().expect("an SMS was sent");
    assert_eq!(mobile, "9876543210");
    let code = code_from(&message);
    assert_eq!(code.len(), 6);

    let body = json!({ "mobile": "9876543210", "code": code });
    let response = post_json(test.app(), "/api/otp/verify", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["verified"], true);

    let response = post_json(test.app(), "/api/otp/verify", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_code_is_rejected(pool: PgPool) {
    let test = common::build_test_app(pool);
    post_json(test.app(), "/api/otp/send", json!({ "mobile": "9876543210" })).await;
    let (_, message) = test.last_sms().unwrap();
    let wrong = if code_from(&message) == "000000" { "111111" } else { "000000" };

    let body = json!({ "mobile": "9876543210", "code": wrong });
    let response = post_json(test.app(), "/api/otp/verify", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid or expired OTP");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn code_survives_a_few_wrong_guesses(pool: PgPool) {
    let test = common::build_test_app(pool);
    post_json(test.app(), "/api/otp/send", json!({ "mobile": "9876543210" })).await;
    let code = code_from(&test.last_sms().unwrap().1);
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for _ in 0..OTP_MAX_ATTEMPTS - 1 {
        let body = json!({ "mobile": "9876543210", "code": wrong });
        let response = post_json(test.app(), "/api/otp/verify", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let body = json!({ "mobile": "9876543210", "code": code });
    let response = post_json(test.app(), "/api/otp/verify", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn code_is_burned_after_attempt_limit(pool: PgPool) {
    let test = common::build_test_app(pool);
    post_json(test.app(), "/api/otp/send", json!({ "mobile": "9876543210" })).await;
    let code = code_from(&test.last_sms().unwrap().1);
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for _ in 0..OTP_MAX_ATTEMPTS {
        let body = json!({ "mobile": "9876543210", "code": wrong });
        let response = post_json(test.app(), "/api/otp/verify", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let body = json!({ "mobile": "9876543210", "code": code });
    let response = post_json(test.app(), "/api/otp/verify", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid or expired OTP");

    // A fresh code starts with a clean slate.
    post_json(test.app(), "/api/otp/send", json!({ "mobile": "9876543210" })).await;
    let fresh = code_from(&test.last_sms().unwrap().1);
    let body = json!({ "mobile": "9876543210", "code": fresh });
    let response = post_json(test.app(), "/api/otp/verify", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_mobile_is_400(pool: PgPool) {
    let test = common::build_test_app(pool);

    let response = post_json(test.app(), "/api/otp/send", json!({ "mobile": "12345" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(test.last_sms().is_none());
}
