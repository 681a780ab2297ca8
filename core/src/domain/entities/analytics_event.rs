//! Analytics event entity for recording login-flow activity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form event payload
pub type EventMetadata = Map<String, Value>;

/// Event names emitted by the login flow
pub mod events {
    pub const OTP_GENERATED: &str = "otp_generated";
    pub const OTP_VALIDATION_SUCCESS: &str = "otp_validation_success";
    pub const OTP_VALIDATION_FAILED: &str = "otp_validation_failed";
    pub const SESSION_STARTED: &str = "session_started";
    pub const LOGOUT: &str = "logout";
}

/// A single recorded event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    /// Event name, see [`events`]
    pub event_name: String,

    /// Milliseconds since the Unix epoch
    pub timestamp: i64,

    /// Optional payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

impl AnalyticsEvent {
    pub fn new(event_name: impl Into<String>, timestamp: i64, metadata: EventMetadata) -> Self {
        Self {
            event_name: event_name.into(),
            timestamp,
            metadata: if metadata.is_empty() { None } else { Some(metadata) },
        }
    }

    /// Look up a metadata field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }
}

/// Build a metadata map from key/value pairs
pub fn event_metadata<const N: usize>(pairs: [(&str, Value); N]) -> EventMetadata {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
