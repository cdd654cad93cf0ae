//! HTTP-level integration tests for login, password change and user
//! management.

mod common;

use axum::http::StatusCode;
use common::{
    admin, body_json, create_user, delete_auth, get_auth, login, post_json, post_json_auth,
    put_json_auth, super_admin, TEST_PASSWORD,
};
use influx_core::roles::ROLE_ADMIN;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_token_and_user(pool: PgPool) {
    let test = common::build_test_app(pool);
    let user = create_user(&test.pool, "loginuser", ROLE_ADMIN).await;

    let body = json!({ "email": user.email, "password": TEST_PASSWORD });
    let response = post_json(test.app(), "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["expiresIn"], 3600);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "admin");
    assert!(json["user"].get("passwordHash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_is_401(pool: PgPool) {
    let test = common::build_test_app(pool);
    let user = create_user(&test.pool, "wrongpw", ROLE_ADMIN).await;

    let body = json!({ "email": user.email, "password": "incorrect_password" });
    let response = post_json(test.app(), "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_unknown_email_is_401(pool: PgPool) {
    let test = common::build_test_app(pool);

    let body = json!({ "email": "ghost@test.com", "password": "whatever" });
    let response = post_json(test.app(), "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_the_caller(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (user, token) = admin(&test, "meuser").await;

    let response = get_auth(test.app(), "/api/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], user.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn change_password_requires_current_password(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (user, token) = admin(&test, "changer").await;

    let body = json!({ "currentPassword": "nope", "newPassword": "brand_new_pw" });
    let response = put_json_auth(test.app(), "/api/auth/change-password", body, &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json!({ "currentPassword": TEST_PASSWORD, "newPassword": "brand_new_pw" });
    let response = put_json_auth(test.app(), "/api/auth/change-password", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json!({ "email": user.email, "password": "brand_new_pw" });
    let response = post_json(test.app(), "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_cannot_list_users(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_user, token) = admin(&test, "plainadmin").await;

    let response = get_auth(test.app(), "/api/users", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn super_admin_creates_user_who_can_log_in(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (_root, token) = super_admin(&test).await;

    let body = json!({
        "name": "New Admin",
        "email": "new.admin@test.com",
        "username": "newadmin",
        "password": TEST_PASSWORD,
        "role": "admin",
    });
    let response = post_json_auth(test.app(), "/api/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    login(test.app(), "new.admin@test.com").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_is_409(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (root, token) = super_admin(&test).await;

    let body = json!({
        "name": "Clone",
        "email": root.email,
        "username": "clone",
        "password": TEST_PASSWORD,
        "role": "admin",
    });
    let response = post_json_auth(test.app(), "/api/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_cannot_promote_themselves(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (user, token) = admin(&test, "climber").await;

    let uri = format!("/api/users/{}", user.id);
    let response = put_json_auth(test.app(), &uri, json!({ "role": "super_admin" }), &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn super_admin_cannot_delete_themselves(pool: PgPool) {
    let test = common::build_test_app(pool);
    let (root, token) = super_admin(&test).await;

    let response = delete_auth(test.app(), &format!("/api/users/{}", root.id), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
