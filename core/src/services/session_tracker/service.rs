//! Session tracker implementation

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use otp_shared::utils::validation::mask_identity;

use crate::domain::entities::analytics_event::{event_metadata, events};
use crate::domain::entities::session::Session;
use crate::services::analytics::EventLogger;
use crate::services::clock::{Clock, SystemClock};

/// Tracks login sessions and reports their duration to analytics
pub struct SessionService<L: EventLogger> {
    event_logger: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<L: EventLogger> SessionService<L> {
    /// Create a new session service
    pub fn new(event_logger: Arc<L>) -> Self {
        Self {
            event_logger,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a custom time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Start a session for a verified identity
    pub async fn start(&self, identity: &str) -> Session {
        let session = Session::new(identity, self.clock.now_millis());

        info!(
            identity = %mask_identity(identity),
            session_id = %session.id,
            started_at = ?session.started_at_utc(),
            event = "session_started",
            "Session started"
        );
        self.event_logger
            .log_event(events::SESSION_STARTED, event_metadata([("email", json!(identity))]))
            .await;

        session
    }

    /// End a session, returning its length in whole seconds
    pub async fn end(&self, session: &Session) -> i64 {
        let duration = self.elapsed(session);

        info!(
            identity = %mask_identity(&session.identity),
            session_id = %session.id,
            duration_seconds = duration,
            event = "logout",
            "Session ended"
        );
        self.event_logger
            .log_event(
                events::LOGOUT,
                event_metadata([
                    ("email", json!(session.identity)),
                    ("sessionDuration", json!(duration)),
                ]),
            )
            .await;

        duration
    }

    /// Whole seconds since the session started
    pub fn elapsed(&self, session: &Session) -> i64 {
        session.elapsed_seconds(self.clock.now_millis())
    }

    /// Elapsed time as `MM:SS`
    pub fn formatted_elapsed(&self, session: &Session) -> String {
        session.formatted_elapsed(self.clock.now_millis())
    }
}
