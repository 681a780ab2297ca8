//! Cache module for Redis-backed persistence
//!
//! This module provides the Redis client with connection and command retry
//! logic, and the `KeyValueStore` backend built on it.

pub mod redis_client;
pub mod redis_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use redis_store::RedisKeyValueStore;

// Re-export commonly used types
pub use otp_shared::config::CacheConfig;
