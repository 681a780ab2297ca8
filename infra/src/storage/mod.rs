//! Storage module for durable key-value persistence
//!
//! Provides a `KeyValueStore` backed by a single JSON document on disk,
//! surviving process restarts without any external service.

pub mod file_store;


pub use file_store::FileKeyValueStore;
