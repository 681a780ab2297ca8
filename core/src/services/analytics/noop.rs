//! Stateless EventLogger implementations

use async_trait::async_trait;
use tracing::info;

use crate::domain::entities::analytics_event::EventMetadata;

use super::EventLogger;

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventLogger;

impl NoOpEventLogger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventLogger for NoOpEventLogger {
    async fn log_event(&self, _event_name: &str, _metadata: EventMetadata) {}
}

/// Emits each event as a structured tracing record and keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventLogger;

#[async_trait]
impl EventLogger for TracingEventLogger {
    async fn log_event(&self, event_name: &str, metadata: EventMetadata) {
        info!(
            target: "analytics",
            event_name = event_name,
            metadata = %serde_json::Value::Object(metadata),
            "Analytics event"
        );
    }
}
