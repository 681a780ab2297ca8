//! Unit tests for session entity

use crate::domain::entities::session::Session;

const START: i64 = 1_700_000_000_000;

#[test]
fn test_new_session() {
    let session = Session::new("user@example.com", START);

    assert_eq!(session.identity, "user@example.com");
    assert_eq!(session.started_at, START);
    assert_eq!(session.elapsed_seconds(START), 0);
}

#[test]
fn test_session_ids_are_unique() {
    let a = Session::new("user@example.com", START);
    let b = Session::new("user@example.com", START);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_elapsed_seconds_floors() {
    let session = Session::new("user@example.com", START);

    assert_eq!(session.elapsed_seconds(START + 999), 0);
    assert_eq!(session.elapsed_seconds(START + 1_000), 1);
    assert_eq!(session.elapsed_seconds(START + 61_500), 61);
}

#[test]
fn test_elapsed_never_negative() {
    let session = Session::new("user@example.com", START);
    assert_eq!(session.elapsed_seconds(START - 5_000), 0);
}

#[test]
fn test_formatted_elapsed() {
    let session = Session::new("user@example.com", START);

    assert_eq!(session.formatted_elapsed(START), "00:00");
    assert_eq!(session.formatted_elapsed(START + 9_000), "00:09");
    assert_eq!(session.formatted_elapsed(START + 75_000), "01:15");
    assert_eq!(session.formatted_elapsed(START + 3_600_000), "60:00");
}

#[test]
fn test_serialization() {
    let session = Session::new("user@example.com", START);

    let json = serde_json::to_string(&session).unwrap();
    assert!(json.contains("\"startedAt\""));

    let deserialized: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(session, deserialized);
}

#[test]
fn test_started_at_utc() {
    let session = Session::new("user@example.com", START);

    let started = session.started_at_utc().unwrap();
    assert_eq!(started.timestamp_millis(), START);
}
