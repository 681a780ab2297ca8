//! Configuration module with area-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `otp` - OTP lifetime, attempt limit and persistence key
//! - `analytics` - Analytics event log capacity and persistence key
//! - `storage` - Key-value backend selection (memory, file, Redis)
//! - `cache` - Redis connection configuration
//! - `environment` - Environment detection and logging configuration

pub mod analytics;
pub mod cache;
pub mod environment;
pub mod otp;
pub mod storage;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use analytics::AnalyticsConfig;
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use storage::{StorageBackend, StorageConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// OTP lifecycle configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Analytics event log configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Persistence backend configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            otp: OtpConfig::default(),
            analytics: AnalyticsConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            otp: OtpConfig::default(),
            analytics: AnalyticsConfig::default(),
            storage: StorageConfig::memory(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            otp: OtpConfig::default(),
            analytics: AnalyticsConfig::default(),
            storage: StorageConfig::file("data/otp_store.json"),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        config.otp = OtpConfig::from_env();
        config.analytics = AnalyticsConfig::from_env();
        if std::env::var("STORAGE_BACKEND").is_ok() {
            config.storage = StorageConfig::from_env();
        }
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        config
    }
}
