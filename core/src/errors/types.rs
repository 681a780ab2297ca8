//! Verification outcome taxonomy
//!
//! These are user-facing, recoverable states returned from verification,
//! never raised as errors. The display strings are the messages shown to
//! the person typing the code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a verification call did not succeed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OtpFailureReason {
    /// No active code for the identity
    #[error("No OTP found. Please request a new one.")]
    NotFound,

    /// Code was past its expiry and has been purged
    #[error("OTP has expired. Please request a new one.")]
    Expired,

    /// Attempt limit already reached; the record was left untouched
    #[error("Maximum attempts exceeded. Please request a new OTP.")]
    AttemptsExceeded,

    /// Wrong code; one attempt was consumed
    #[error("Incorrect OTP. {attempts_remaining} attempts remaining.")]
    Incorrect { attempts_remaining: u32 },
}

impl OtpFailureReason {
    /// Reason tag attached to `otp_validation_failed` analytics events
    pub fn analytics_reason(&self) -> &'static str {
        match self {
            Self::NotFound => "no_otp",
            Self::Expired => "expired",
            Self::AttemptsExceeded => "max_attempts",
            Self::Incorrect { .. } => "incorrect",
        }
    }

    /// Whether this outcome consumed an attempt
    pub fn consumed_attempt(&self) -> bool {
        matches!(self, Self::Incorrect { .. })
    }

    /// Whether only a fresh code can resolve this outcome
    pub fn requires_new_code(&self) -> bool {
        match self {
            Self::Incorrect { attempts_remaining } => *attempts_remaining == 0,
            _ => true,
        }
    }
}
