//! Handlers for `/otp` (public mobile verification).

use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use influx_core::error::CoreError;
use influx_core::otp::{
    generate_code, hash_code, otp_message, validate_mobile, OTP_MAX_ATTEMPTS, OTP_TTL_MINS,
};
use influx_db::repositories::OtpRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub mobile: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub mobile: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct SendOtpResponse {
    pub sent: bool,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub verified: bool,
}

/// POST /api/otp/send
///
/// Gateway failures are reported as `sent: false`; the code stays stored.
pub async fn send(
    State(state): State<AppState>,
    Json(input): Json<SendOtpRequest>,
) -> AppResult<Json<SendOtpResponse>> {
    let mobile = input.mobile.trim();
    validate_mobile(mobile).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let code = generate_code();
    let expires_at = Utc::now() + Duration::minutes(OTP_TTL_MINS);
    OtpRepo::create(&state.pool, mobile, &hash_code(mobile, &code), expires_at).await?;

    let sent = match state.sms.send_sms(mobile, &otp_message(&code)).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "OTP delivery failed");
            false
        }
    };
    tracing::info!(sent, "OTP issued");
    Ok(Json(SendOtpResponse { sent }))
}

/// POST /api/otp/verify
///
/// Only the latest live code is checked; it is burned after
/// [`OTP_MAX_ATTEMPTS`] wrong guesses.
pub async fn verify(
    State(state): State<AppState>,
    Json(input): Json<VerifyOtpRequest>,
) -> AppResult<Json<VerifyOtpResponse>> {
    let mobile = input.mobile.trim();
    validate_mobile(mobile).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let consumed = OtpRepo::consume(
        &state.pool,
        mobile,
        &hash_code(mobile, input.code.trim()),
        OTP_MAX_ATTEMPTS,
    )
    .await?;
    if !consumed {
        return Err(AppError::BadRequest("Invalid or expired OTP".into()));
    }
    Ok(Json(VerifyOtpResponse { verified: true }))
}
