//! One-time passcodes for mobile verification.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Minutes a sent code stays valid.
pub const OTP_TTL_MINS: i64 = 10;

/// Wrong guesses after which a code is burned.
pub const OTP_MAX_ATTEMPTS: i32 = 5;

/// Number of digits in a code.
pub const OTP_LENGTH: usize = 6;

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid mobile regex"));

/// A mobile number must be exactly ten digits.
pub fn validate_mobile(mobile: &str) -> Result<(), String> {
    if MOBILE_RE.is_match(mobile) {
        Ok(())
    } else {
        Err("Mobile number must be exactly 10 digits".to_string())
    }
}

/// Generate a zero-padded numeric code.
pub fn generate_code() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{n:0width$}", width = OTP_LENGTH)
}

/// SHA-256 hex digest of `mobile:code`; only the digest is stored.
pub fn hash_code(mobile: &str, code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(mobile.as_bytes());
    hasher.update(b":");
    hasher.update(code.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Text sent to the handset.
pub fn otp_message(code: &str) -> String {
    format!(
        "{code} is your OTP for influencer onboarding verification. \
         It is valid for {OTP_TTL_MINS} minutes. Do not share it with anyone."
    )
}
