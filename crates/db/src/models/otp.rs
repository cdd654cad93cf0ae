//! One-time passcode rows.

use influx_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `otp_codes` table.
#[derive(Debug, Clone, FromRow)]
pub struct OtpCode {
    pub id: DbId,
    pub mobile: String,
    pub code_hash: String,
    pub expires_at: Timestamp,
    pub consumed_at: Option<Timestamp>,
    /// Wrong guesses against this code.
    pub attempts: i32,
    pub created_at: Timestamp,
}
