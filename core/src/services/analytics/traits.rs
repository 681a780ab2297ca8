//! Trait for analytics event sinks

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::analytics_event::EventMetadata;

/// Append-only analytics sink
///
/// Logging is best-effort: implementations must not fail the caller and
/// should return promptly, handling their own errors internally.
#[async_trait]
pub trait EventLogger: Send + Sync {
    /// Record an event with its metadata
    async fn log_event(&self, event_name: &str, metadata: EventMetadata);
}

#[async_trait]
impl<T: EventLogger + ?Sized> EventLogger for Arc<T> {
    async fn log_event(&self, event_name: &str, metadata: EventMetadata) {
        (**self).log_event(event_name, metadata).await
    }
}
