//! Tests for the in-memory key-value store

use std::sync::Arc;

use crate::errors::DomainError;
use crate::repositories::kv::{InMemoryKeyValueStore, KeyValueStore};

#[tokio::test]
async fn test_set_get_remove() {
    let store = InMemoryKeyValueStore::new();

    assert_eq!(store.get("@otp_storage").await.unwrap(), None);

    store.set("@otp_storage", "{}").await.unwrap();
    assert_eq!(store.get("@otp_storage").await.unwrap(), Some("{}".to_string()));

    store.set("@otp_storage", r#"{"a":1}"#).await.unwrap();
    assert_eq!(store.get("@otp_storage").await.unwrap(), Some(r#"{"a":1}"#.to_string()));

    store.remove("@otp_storage").await.unwrap();
    assert_eq!(store.get("@otp_storage").await.unwrap(), None);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_remove_absent_key_is_ok() {
    let store = InMemoryKeyValueStore::new();
    assert!(store.remove("missing").await.is_ok());
}

#[tokio::test]
async fn test_clones_share_entries() {
    let store = InMemoryKeyValueStore::new();
    let other = store.clone();

    store.set("key", "value").await.unwrap();
    assert_eq!(other.raw("key"), Some("value".to_string()));
    assert_eq!(other.len(), 1);
}

#[tokio::test]
async fn test_failure_injection() {
    let store = InMemoryKeyValueStore::new();
    store.insert_raw("key", "value");
    store.set_should_fail(true);

    assert!(matches!(store.get("key").await, Err(DomainError::Storage { .. })));
    assert!(store.set("key", "other").await.is_err());
    assert!(store.remove("key").await.is_err());

    // Raw access bypasses failure injection and shows nothing changed
    assert_eq!(store.raw("key"), Some("value".to_string()));

    store.set_should_fail(false);
    assert_eq!(store.get("key").await.unwrap(), Some("value".to_string()));
}

#[tokio::test]
async fn test_arc_forwarding() {
    let store: Arc<InMemoryKeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
    let shared: Arc<dyn KeyValueStore> = store.clone();

    shared.set("key", "value").await.unwrap();
    assert_eq!(store.raw("key"), Some("value".to_string()));
}
