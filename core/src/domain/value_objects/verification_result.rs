//! Verification result value object returned to the login screen.

use serde::{Deserialize, Serialize};

use crate::errors::OtpFailureReason;

/// Outcome of a single verification call
///
/// `valid` is true only on a successful match; otherwise `reason` says why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the code was accepted
    pub valid: bool,

    /// Failure reason, absent on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<OtpFailureReason>,
}

impl VerificationResult {
    /// Creates a successful result
    pub fn success() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    /// Creates a failed result with the given reason
    pub fn failure(reason: OtpFailureReason) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }

    /// Attempts left after an incorrect code, `None` for every other outcome
    pub fn attempts_remaining(&self) -> Option<u32> {
        match self.reason {
            Some(OtpFailureReason::Incorrect { attempts_remaining }) => Some(attempts_remaining),
            _ => None,
        }
    }

    /// User-facing message for a failed result
    pub fn message(&self) -> Option<String> {
        self.reason.map(|reason| reason.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let result = VerificationResult::success();
        assert!(result.valid);
        assert!(result.reason.is_none());
        assert!(result.message().is_none());
        assert!(result.attempts_remaining().is_none());
    }

    #[test]
    fn test_incorrect_carries_remaining_attempts() {
        let result = VerificationResult::failure(OtpFailureReason::Incorrect { attempts_remaining: 1 });
        assert!(!result.valid);
        assert_eq!(result.attempts_remaining(), Some(1));
        assert_eq!(result.message().unwrap(), "Incorrect OTP. 1 attempts remaining.");
    }

    #[test]
    fn test_other_failures_have_no_remaining_count() {
        let result = VerificationResult::failure(OtpFailureReason::AttemptsExceeded);
        assert_eq!(result.attempts_remaining(), None);
        assert_eq!(
            result.message().unwrap(),
            "Maximum attempts exceeded. Please request a new OTP."
        );
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&VerificationResult::success()).unwrap();
        assert_eq!(json, r#"{"valid":true}"#);

        let json = serde_json::to_string(&VerificationResult::failure(OtpFailureReason::NotFound)).unwrap();
        assert_eq!(json, r#"{"valid":false,"reason":{"kind":"not_found"}}"#);
    }
}
