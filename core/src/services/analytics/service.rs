//! Persisted analytics event log

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use otp_shared::config::AnalyticsConfig;

use crate::domain::entities::analytics_event::{AnalyticsEvent, EventMetadata};
use crate::errors::DomainResult;
use crate::repositories::KeyValueStore;
use crate::services::clock::{Clock, SystemClock};

use super::EventLogger;

/// Event logger keeping the most recent events as a JSON array in a
/// key-value store
///
/// Oldest events are evicted first once `max_events` is reached. Storage
/// failures are logged and discarded; callers never observe them.
pub struct StoredEventLogger<S: KeyValueStore> {
    store: Arc<S>,
    config: AnalyticsConfig,
    clock: Arc<dyn Clock>,
    /// Serializes the read-modify-write of the event list
    append_lock: Mutex<()>,
}

impl<S: KeyValueStore> StoredEventLogger<S> {
    /// Create a new stored event logger
    pub fn new(store: Arc<S>, config: AnalyticsConfig) -> Self {
        Self {
            store,
            config,
            clock: Arc::new(SystemClock),
            append_lock: Mutex::new(()),
        }
    }

    /// Use a custom time source for event timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Probe the backing store and report readiness
    ///
    /// Returns `false` when the store could not be read; logging keeps
    /// working either way.
    pub async fn initialize(&self) -> bool {
        match self.store.get(&self.config.storage_key).await {
            Ok(existing) => {
                info!(
                    key = %self.config.storage_key,
                    existing = existing.is_some(),
                    enabled = self.config.enabled,
                    event = "analytics_initialized",
                    "Analytics storage ready"
                );
                true
            }
            Err(e) => {
                error!(
                    key = %self.config.storage_key,
                    error = %e,
                    event = "analytics_init_failed",
                    "Analytics storage unavailable"
                );
                false
            }
        }
    }

    /// All stored events, oldest first; empty on any failure
    pub async fn events(&self) -> Vec<AnalyticsEvent> {
        match self.load().await {
            Ok(events) => events,
            Err(e) => {
                error!(
                    key = %self.config.storage_key,
                    error = %e,
                    event = "analytics_read_failed",
                    "Error reading analytics events"
                );
                Vec::new()
            }
        }
    }

    /// Drop every stored event
    pub async fn clear(&self) {
        let _guard = self.append_lock.lock().await;
        if let Err(e) = self.store.remove(&self.config.storage_key).await {
            error!(
                key = %self.config.storage_key,
                error = %e,
                event = "analytics_clear_failed",
                "Error clearing analytics events"
            );
        }
    }

    async fn load(&self) -> DomainResult<Vec<AnalyticsEvent>> {
        let Some(blob) = self.store.get(&self.config.storage_key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&blob) {
            Ok(events) => Ok(events),
            Err(e) => {
                warn!(
                    key = %self.config.storage_key,
                    error = %e,
                    event = "analytics_storage_corrupt",
                    "Analytics blob is not an event list, starting over"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn append(&self, event: AnalyticsEvent) -> DomainResult<()> {
        let _guard = self.append_lock.lock().await;

        let mut events = self.load().await?;
        events.push(event);
        if events.len() > self.config.max_events {
            let overflow = events.len() - self.config.max_events;
            events.drain(..overflow);
        }

        let blob = serde_json::to_string(&events)?;
        self.store.set(&self.config.storage_key, &blob).await
    }
}

#[async_trait]
impl<S: KeyValueStore> EventLogger for StoredEventLogger<S> {
    async fn log_event(&self, event_name: &str, metadata: EventMetadata) {
        let event = AnalyticsEvent::new(event_name, self.clock.now_millis(), metadata);

        debug!(
            target: "analytics",
            event_name = event_name,
            timestamp = event.timestamp,
            "Analytics event"
        );

        if !self.config.enabled {
            return;
        }

        if let Err(e) = self.append(event).await {
            error!(
                key = %self.config.storage_key,
                event_name = event_name,
                error = %e,
                event = "analytics_write_failed",
                "Error logging analytics event"
            );
        }
    }
}
