//! Recording implementation of EventLogger for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entities::analytics_event::{AnalyticsEvent, EventMetadata};

use super::EventLogger;

/// Keeps every event in memory so tests can assert on the emitted sequence
#[derive(Clone, Default)]
pub struct MockEventLogger {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl MockEventLogger {
    /// Create a new mock logger
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.lock().clone()
    }

    /// Names of all recorded events, oldest first
    pub fn event_names(&self) -> Vec<String> {
        self.lock().iter().map(|e| e.event_name.clone()).collect()
    }

    /// Most recent event
    pub fn last(&self) -> Option<AnalyticsEvent> {
        self.lock().last().cloned()
    }

    /// Clear all recorded events
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AnalyticsEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EventLogger for MockEventLogger {
    async fn log_event(&self, event_name: &str, metadata: EventMetadata) {
        let event = AnalyticsEvent::new(event_name, 0, metadata);
        self.lock().push(event);
    }
}
