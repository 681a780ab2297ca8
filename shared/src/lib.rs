//! Shared utilities and common types for the OTP login workspace
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types
//! - Identity validation and normalization

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AnalyticsConfig, AppConfig, CacheConfig, Environment, LogFormat, LoggingConfig, OtpConfig,
    StorageBackend, StorageConfig,
};
pub use utils::validation;
