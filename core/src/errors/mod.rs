//! Domain-specific error types and error handling.

mod types;


pub use types::OtpFailureReason;

use otp_shared::validation::ValidationError;
use thiserror::Error;

/// Core domain errors
///
/// These are faults (storage, serialization, invalid input), as opposed to
/// [`OtpFailureReason`], which describes recoverable verification outcomes.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid identity: {0}")]
    InvalidIdentity(#[from] ValidationError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for a storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
