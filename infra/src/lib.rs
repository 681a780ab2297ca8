//! # Infrastructure Layer
//!
//! This crate provides the concrete pieces the OTP core runs on:
//! - **Storage**: durable `KeyValueStore` backends (JSON file, Redis)
//! - **Logging**: `tracing-subscriber` setup driven by `LoggingConfig`
//! - **Configuration**: layered loading from defaults, TOML files and environment
//! - **Runtime**: assembly of store, analytics logger and OTP manager from `AppConfig`
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis storage backend (default)

// Re-export core types for convenience
pub use otp_core::errors::*;

/// Cache module - Redis client and key-value backend
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Configuration loading
pub mod config;

/// Tracing subscriber setup
pub mod logging;

/// Runtime assembly from configuration
pub mod runtime;

/// Storage module - file-backed key-value store
pub mod storage;

pub use runtime::{build_store, OtpRuntime};
pub use storage::FileKeyValueStore;

#[cfg(feature = "redis-cache")]
pub use cache::{RedisClient, RedisKeyValueStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::storage(error.to_string())
    }
}
