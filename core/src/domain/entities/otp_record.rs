//! OTP record entity for email-based login.

use chrono::{DateTime, TimeZone, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use otp_shared::config::otp::{
    DEFAULT_OTP_EXPIRY_SECONDS as EXPIRY_SECONDS, DEFAULT_OTP_LENGTH as CODE_LENGTH,
    DEFAULT_OTP_MAX_ATTEMPTS as MAX_ATTEMPTS,
};

/// Identity -> active record. Absence of a key means no active OTP.
pub type OtpStore = HashMap<String, OtpRecord>;

/// One issued code and its verification state
///
/// Timestamps are milliseconds since the Unix epoch. The serialized field
/// names (`code`, `expiresAt`, `attemptCount`, `createdAt`) are the persisted
/// layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRecord {
    /// The zero-padded decimal code
    pub code: String,

    /// Instant after which the code is logically expired
    pub expires_at: i64,

    /// Attempts that reached the comparison step
    pub attempt_count: u32,

    /// Instant of issuance, informational only
    pub created_at: i64,
}

impl OtpRecord {
    /// Creates a fresh record with no attempts used
    ///
    /// # Arguments
    ///
    /// * `code` - The generated code
    /// * `now_millis` - Issuance instant
    /// * `lifetime_millis` - Time until expiry
    pub fn new(code: impl Into<String>, now_millis: i64, lifetime_millis: i64) -> Self {
        Self {
            code: code.into(),
            expires_at: now_millis + lifetime_millis,
            attempt_count: 0,
            created_at: now_millis,
        }
    }

    /// Strictly past `expires_at`; the expiry instant itself is still valid
    pub fn is_expired(&self, now_millis: i64) -> bool {
        now_millis > self.expires_at
    }

    /// Attempt limit reached
    pub fn is_locked(&self, max_attempts: u32) -> bool {
        self.attempt_count >= max_attempts
    }

    /// Whole seconds left before expiry, rounded up and never negative
    pub fn remaining_seconds(&self, now_millis: i64) -> i64 {
        let remaining = self.expires_at - now_millis;
        if remaining <= 0 {
            0
        } else {
            (remaining + 999) / 1000
        }
    }

    /// Attempts left before lockout (0 if exceeded)
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempt_count)
    }

    /// Constant-time comparison against a candidate code
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Expiry as a UTC timestamp, for display and logging
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.expires_at).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_new_record() {
        let record = OtpRecord::new("482913", NOW, 60_000);

        assert_eq!(record.code, "482913");
        assert_eq!(record.expires_at, NOW + 60_000);
        assert_eq!(record.attempt_count, 0);
        assert_eq!(record.created_at, NOW);
        assert!(!record.is_expired(NOW));
        assert!(!record.is_locked(MAX_ATTEMPTS));
    }

    #[test]
    fn test_expiry_boundary() {
        let record = OtpRecord::new("482913", NOW, 60_000);

        assert!(!record.is_expired(NOW + 60_000));
        assert!(record.is_expired(NOW + 60_001));
    }

    #[test]
    fn test_remaining_seconds_rounds_up_and_clamps() {
        let record = OtpRecord::new("482913", NOW, 60_000);

        assert_eq!(record.remaining_seconds(NOW), 60);
        assert_eq!(record.remaining_seconds(NOW + 1), 60);
        assert_eq!(record.remaining_seconds(NOW + 999), 60);
        assert_eq!(record.remaining_seconds(NOW + 1_000), 59);
        assert_eq!(record.remaining_seconds(NOW + 59_999), 1);
        assert_eq!(record.remaining_seconds(NOW + 60_000), 0);
        assert_eq!(record.remaining_seconds(NOW + 120_000), 0);
    }

    #[test]
    fn test_remaining_attempts() {
        let mut record = OtpRecord::new("482913", NOW, 60_000);
        assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 3);

        record.attempt_count = 3;
        assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 0);
        assert!(record.is_locked(MAX_ATTEMPTS));

        record.attempt_count = 5;
        assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 0);
    }

    #[test]
    fn test_persisted_layout() {
        let record = OtpRecord::new("004211", NOW, 60_000);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["code"], "004211");
        assert_eq!(json["expiresAt"], NOW + 60_000);
        assert_eq!(json["attemptCount"], 0);
        assert_eq!(json["createdAt"], NOW);
    }

    #[test]
    fn test_expires_at_utc() {
        let record = OtpRecord::new("482913", NOW, 60_000);
        let expires = record.expires_at_utc().unwrap();
        assert_eq!(expires.timestamp_millis(), NOW + 60_000);
    }
}
