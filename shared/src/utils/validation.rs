//! Identity validation and normalization utilities

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Loose email shape: something@something.something, no whitespace
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Validation error with field-level details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Common validation functions
pub mod validators {
    use super::EMAIL_REGEX;

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if an email address is valid (basic shape check on the trimmed value)
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email.trim())
    }
}

pub use validators::is_valid_email;

/// Normalize an identity into the key used for OTP storage
///
/// Surrounding whitespace is removed and the value is lowercased, so
/// `"  Alice@Example.COM "` and `"alice@example.com"` share one record.
pub fn normalize_identity(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate an email identity and return its normalized form
pub fn parse_identity(raw: &str) -> Result<String, ValidationError> {
    if !validators::not_empty(raw) {
        return Err(ValidationError::new(
            "email",
            "Please enter your email address",
            "REQUIRED",
        ));
    }

    if !validators::is_valid_email(raw) {
        return Err(ValidationError::new(
            "email",
            "Please enter a valid email address",
            "INVALID_FORMAT",
        ));
    }

    Ok(normalize_identity(raw))
}

/// Mask an identity for logging, keeping the first character and the domain
pub fn mask_identity(identity: &str) -> String {
    match identity.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ if identity.chars().count() <= 4 => "****".to_string(),
        _ => {
            let first: String = identity.chars().take(2).collect();
            format!("{}***", first)
        }
    }
}
