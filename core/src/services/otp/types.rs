//! Types for OTP manager results

use serde::{Deserialize, Serialize};

/// Result of issuing a code through the email entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedOtp {
    /// Normalized identity the code belongs to
    pub identity: String,
    /// The generated code, delivered out of band
    pub code: String,
    /// Lifetime of the code in seconds
    pub expires_in_seconds: i64,
}
