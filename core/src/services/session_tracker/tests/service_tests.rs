//! Unit tests for the session tracker

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::analytics_event::events;
use crate::services::analytics::MockEventLogger;
use crate::services::clock::MockClock;
use crate::services::session_tracker::SessionService;

fn service() -> (MockEventLogger, Arc<MockClock>, SessionService<MockEventLogger>) {
    let logger = MockEventLogger::new();
    let clock = Arc::new(MockClock::new(1_700_000_000_000));
    let service = SessionService::new(Arc::new(logger.clone())).with_clock(clock.clone());
    (logger, clock, service)
}

#[tokio::test]
async fn test_start_emits_session_started() {
    let (logger, _, service) = service();

    let session = service.start("user@example.com").await;
    assert_eq!(session.identity, "user@example.com");
    assert_eq!(session.started_at, 1_700_000_000_000);

    assert_eq!(logger.event_names(), vec![events::SESSION_STARTED]);
    assert_eq!(logger.last().unwrap().field("email"), Some(&json!("user@example.com")));
}

#[tokio::test]
async fn test_elapsed_follows_clock() {
    let (_, clock, service) = service();
    let session = service.start("user@example.com").await;

    assert_eq!(service.elapsed(&session), 0);
    assert_eq!(service.formatted_elapsed(&session), "00:00");

    clock.advance_secs(75);
    assert_eq!(service.elapsed(&session), 75);
    assert_eq!(service.formatted_elapsed(&session), "01:15");
}

#[tokio::test]
async fn test_end_reports_duration() {
    let (logger, clock, service) = service();
    let session = service.start("user@example.com").await;

    clock.advance(chrono::Duration::milliseconds(42_900));
    let duration = service.end(&session).await;
    assert_eq!(duration, 42);

    assert_eq!(
        logger.event_names(),
        vec![events::SESSION_STARTED, events::LOGOUT]
    );
    let logout = logger.last().unwrap();
    assert_eq!(logout.field("email"), Some(&json!("user@example.com")));
    assert_eq!(logout.field("sessionDuration"), Some(&json!(42)));
}

#[tokio::test]
async fn test_sessions_have_distinct_ids() {
    let (_, _, service) = service();
    let a = service.start("user@example.com").await;
    let b = service.start("user@example.com").await;
    assert_ne!(a.id, b.id);
}
