#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use influx_api::auth::jwt::JwtConfig;
use influx_api::auth::password::hash_password;
use influx_api::config::ServerConfig;
use influx_api::router::build_app_router;
use influx_api::state::AppState;
use influx_core::roles::{ROLE_ADMIN, ROLE_SUPER_ADMIN};
use influx_db::models::user::{CreateUser, User};
use influx_db::repositories::UserRepo;
use influx_notify::{EmailError, EmailMessage, Notifier, SmsError, SmsGateway};

pub const TEST_PASSWORD: &str = "test_password_123";

/// Multipart body cap used by the test router; above axum's 2 MB default.
pub const TEST_UPLOAD_LIMIT: usize = 4 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Recording channels
// ---------------------------------------------------------------------------

/// Captures every email instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<EmailMessage>>,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Captures every text message instead of sending it.
#[derive(Default)]
pub struct RecordingSms {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait::async_trait]
impl SmsGateway for RecordingSms {
    async fn send_sms(&self, mobile: &str, message: &str) -> Result<(), SmsError> {
        self.sent
            .lock()
            .unwrap()
            .push((mobile.to_string(), message.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// The router under test plus handles on its outbound channels.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub notifier: Arc<RecordingNotifier>,
    pub sms: Arc<RecordingSms>,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn last_sms(&self) -> Option<(String, String)> {
        self.sms.sent.lock().unwrap().last().cloned()
    }

    pub fn email_count(&self) -> usize {
        self.notifier.sent.lock().unwrap().len()
    }
}

/// Build a test `ServerConfig` writing uploads under `upload_dir`.
pub fn test_config(upload_dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.path().to_path_buf(),
        max_upload_bytes: TEST_UPLOAD_LIMIT,
        form_url: "http://localhost:5173/onboard".to_string(),
        form_pdf_path: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            token_expiry_hours: 1,
        },
    }
}

/// Build the full application router, using the same middleware stack as
/// production, backed by recording email and SMS channels.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("temp upload dir");
    let config = test_config(&upload_dir);
    let notifier = Arc::new(RecordingNotifier::default());
    let sms = Arc::new(RecordingSms::default());

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        notifier: notifier.clone(),
        sms: sms.clone(),
    };

    TestApp {
        router: build_app_router(state, &config),
        pool,
        notifier,
        sms,
        upload_dir,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Create a user directly in the database with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    let input = CreateUser {
        name: username.to_string(),
        email: format!("{username}@test.com"),
        username: username.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
        mobile: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return the bearer token.
pub async fn login(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"].as_str().expect("token").to_string()
}

/// Create a super admin and return it with a token.
pub async fn super_admin(test: &TestApp) -> (User, String) {
    let user = create_user(&test.pool, "root", ROLE_SUPER_ADMIN).await;
    let token = login(test.app(), &user.email).await;
    (user, token)
}

/// Create an admin and return it with a token.
pub async fn admin(test: &TestApp, username: &str) -> (User, String) {
    let user = create_user(&test.pool, username, ROLE_ADMIN).await;
    let token = login(test.app(), &user.email).await;
    (user, token)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::DELETE, uri, Some(token), None)).await
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "influx-test-boundary";

/// A file part for [`multipart_request`].
pub struct FilePart<'a> {
    pub field: &'a str,
    pub filename: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

/// Encode text fields and files as `multipart/form-data`.
pub fn multipart_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
    files: &[FilePart<'_>],
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for file in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.filename, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

pub async fn send_request(app: Router, request: Request<Body>) -> Response<Body> {
    send(app, request).await
}

/// Text fields of a complete onboarding submission.
pub fn onboarding_fields<'a>(name: &'a str, email: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", name),
        ("email", email),
        ("mobile", "9876543210"),
        ("city", "Pune"),
        ("state", "MH"),
        ("category", "Fashion"),
        ("platformType", "Paid"),
        ("instagramFollowers", "25000"),
        ("reelCost", "5000"),
        ("panNumber", "abcde1234f"),
        ("bankAccountName", name),
        ("bankAccountNumber", "00112233"),
        ("ifscCode", "hdfc0001"),
    ]
}

/// Onboard an influencer through the public endpoint and return its id.
pub async fn onboard(test: &TestApp, name: &str, email: &str, onboarder: Option<i64>) -> i64 {
    let onboarder = onboarder.map(|id| id.to_string());
    let mut fields = onboarding_fields(name, email);
    if let Some(id) = onboarder.as_deref() {
        fields.push(("onboarderId", id));
    }
    let request = multipart_request(Method::POST, "/api/influencers/onboard", None, &fields, &[]);
    let response = send_request(test.app(), request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
