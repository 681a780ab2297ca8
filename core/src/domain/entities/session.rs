//! Login session entity started after a successful verification.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session identifier
    pub id: Uuid,

    /// Normalized identity that logged in
    pub identity: String,

    /// Milliseconds since the Unix epoch
    pub started_at: i64,
}

impl Session {
    /// Creates a new session starting at `now_millis`
    pub fn new(identity: impl Into<String>, now_millis: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity: identity.into(),
            started_at: now_millis,
        }
    }

    /// Whole seconds since the session started, never negative
    pub fn elapsed_seconds(&self, now_millis: i64) -> i64 {
        ((now_millis - self.started_at) / 1000).max(0)
    }

    /// Elapsed time rendered as zero-padded `MM:SS`
    pub fn formatted_elapsed(&self, now_millis: i64) -> String {
        let elapsed = self.elapsed_seconds(now_millis);
        format!("{:02}:{:02}", elapsed / 60, elapsed % 60)
    }

    /// Start time as a UTC timestamp
    pub fn started_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.started_at).single()
    }
}
