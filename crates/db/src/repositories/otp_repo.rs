//! Repository for the `otp_codes` table.

use influx_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::otp::OtpCode;

const COLUMNS: &str = "id, mobile, code_hash, expires_at, consumed_at, attempts, created_at";

pub struct OtpRepo;

impl OtpRepo {
    /// Store a freshly sent code, invalidating any earlier unconsumed ones
    /// for the same mobile.
    pub async fn create(
        pool: &PgPool,
        mobile: &str,
        code_hash: &str,
        expires_at: Timestamp,
    ) -> Result<OtpCode, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query(
            "UPDATE otp_codes SET consumed_at = NOW() WHERE mobile = $1 AND consumed_at IS NULL",
        )
        .bind(mobile)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO otp_codes (mobile, code_hash, expires_at) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OtpCode>(&query)
            .bind(mobile)
            .bind(code_hash)
            .bind(expires_at)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Check `code_hash` against the live code for `mobile` and consume it
    /// on a match. A miss counts as an attempt; the code is burned once
    /// `max_attempts` misses accumulate. Returns `true` when a code was
    /// consumed by a match.
    pub async fn consume(
        pool: &PgPool,
        mobile: &str,
        code_hash: &str,
        max_attempts: i32,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "SELECT {COLUMNS} FROM otp_codes \
             WHERE mobile = $1 AND consumed_at IS NULL AND expires_at > NOW() \
             ORDER BY created_at DESC, id DESC LIMIT 1 FOR UPDATE"
        );
        let Some(live) = sqlx::query_as::<_, OtpCode>(&query)
            .bind(mobile)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(false);
        };

        let matched = live.code_hash == code_hash;
        if matched {
            sqlx::query("UPDATE otp_codes SET consumed_at = NOW() WHERE id = $1")
                .bind(live.id)
                .execute(&mut *tx)
                .await?;
        } else {
            sqlx::query(
                "UPDATE otp_codes SET attempts = attempts + 1, \
                 consumed_at = CASE WHEN attempts + 1 >= $2 THEN NOW() ELSE NULL END \
                 WHERE id = $1",
            )
            .bind(live.id)
            .bind(max_attempts)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(matched)
    }
}
