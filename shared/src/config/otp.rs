//! OTP lifecycle configuration module

use serde::{Deserialize, Serialize};

use crate::utils::validation::ValidationError;

/// Default number of seconds an issued code stays valid
pub const DEFAULT_OTP_EXPIRY_SECONDS: i64 = 60;

/// Default number of comparison attempts allowed per code
pub const DEFAULT_OTP_MAX_ATTEMPTS: u32 = 3;

/// Default number of digits in a code
pub const DEFAULT_OTP_LENGTH: usize = 6;

/// Longest code whose numeric range fits in a `u64`
pub const MAX_OTP_LENGTH: usize = 18;

/// Longest lifetime whose millisecond value fits in an `i64`
pub const MAX_OTP_EXPIRY_SECONDS: i64 = i64::MAX / 1000;

/// Default storage key holding the serialized identity -> record map
pub const DEFAULT_OTP_STORAGE_KEY: &str = "@otp_storage";

/// OTP lifecycle configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Seconds between issuance and expiry
    pub expiry_seconds: i64,

    /// Attempts allowed before the code is locked
    pub max_attempts: u32,

    /// Number of digits in a generated code
    pub code_length: usize,

    /// Key under which the whole OTP store is persisted
    pub storage_key: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry_seconds: DEFAULT_OTP_EXPIRY_SECONDS,
            max_attempts: DEFAULT_OTP_MAX_ATTEMPTS,
            code_length: DEFAULT_OTP_LENGTH,
            storage_key: String::from(DEFAULT_OTP_STORAGE_KEY),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let expiry_seconds = std::env::var("OTP_EXPIRY_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &i64| *v > 0)
            .unwrap_or(defaults.expiry_seconds);
        let max_attempts = std::env::var("OTP_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &u32| *v > 0)
            .unwrap_or(defaults.max_attempts);
        let storage_key =
            std::env::var("OTP_STORAGE_KEY").unwrap_or(defaults.storage_key);

        Self {
            expiry_seconds,
            max_attempts,
            storage_key,
            ..Default::default()
        }
    }

    /// Code lifetime in milliseconds
    pub fn expiry_millis(&self) -> i64 {
        self.expiry_seconds.saturating_mul(1000)
    }

    /// Check the lifecycle bounds: positive lifetime, at least one attempt
    /// and a code length between 1 and [`MAX_OTP_LENGTH`]
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_OTP_EXPIRY_SECONDS).contains(&self.expiry_seconds) {
            return Err(ValidationError::new(
                "otp.expiry_seconds",
                format!("must be between 1 and {}", MAX_OTP_EXPIRY_SECONDS),
                "OUT_OF_RANGE",
            ));
        }
        if self.max_attempts == 0 {
            return Err(ValidationError::new(
                "otp.max_attempts",
                "must be at least 1",
                "OUT_OF_RANGE",
            ));
        }
        if !(1..=MAX_OTP_LENGTH).contains(&self.code_length) {
            return Err(ValidationError::new(
                "otp.code_length",
                format!("must be between 1 and {}", MAX_OTP_LENGTH),
                "OUT_OF_RANGE",
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ValidationError::new(
                "otp.storage_key",
                "must not be empty",
                "REQUIRED",
            ));
        }
        Ok(())
    }

    /// Set the code lifetime
    pub fn with_expiry_seconds(mut self, seconds: i64) -> Self {
        self.expiry_seconds = seconds;
        self
    }

    /// Set the attempt limit
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the persistence key
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}
