//! Analytics event log configuration module

use serde::{Deserialize, Serialize};

/// Default storage key for the analytics event log
pub const DEFAULT_ANALYTICS_STORAGE_KEY: &str = "@analytics_events";

/// Default number of retained analytics events
pub const DEFAULT_ANALYTICS_MAX_EVENTS: usize = 100;

/// Analytics event log configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Persist events to the key-value store
    pub enabled: bool,

    /// Key under which the event list is persisted
    pub storage_key: String,

    /// Most recent events kept, older ones are evicted first
    pub max_events: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            storage_key: String::from(DEFAULT_ANALYTICS_STORAGE_KEY),
            max_events: DEFAULT_ANALYTICS_MAX_EVENTS,
        }
    }
}

impl AnalyticsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let enabled = std::env::var("ANALYTICS_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.enabled);
        let max_events = std::env::var("ANALYTICS_MAX_EVENTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_events);

        Self {
            enabled,
            max_events,
            ..defaults
        }
    }

    /// Disabled analytics (events are only traced)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}
