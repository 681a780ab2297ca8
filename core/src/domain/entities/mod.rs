//! Domain entities representing core business objects.

pub mod analytics_event;
pub mod otp_record;
pub mod session;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use analytics_event::{events, event_metadata, AnalyticsEvent, EventMetadata};
pub use otp_record::{OtpRecord, OtpStore, CODE_LENGTH, EXPIRY_SECONDS, MAX_ATTEMPTS};
pub use session::Session;
