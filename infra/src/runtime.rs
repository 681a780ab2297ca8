//! Runtime assembly from configuration
//!
//! Builds the configured key-value backend and wires the analytics logger,
//! OTP manager and session service on top of it.

use std::sync::Arc;
use tracing::info;

use otp_core::repositories::{InMemoryKeyValueStore, KeyValueStore};
use otp_core::services::{OtpManager, SessionService, StoredEventLogger};
use otp_shared::config::{AppConfig, StorageBackend, StorageConfig};

use crate::storage::FileKeyValueStore;
use crate::InfrastructureError;

/// Type-erased key-value backend
pub type DynStore = Arc<dyn KeyValueStore>;

/// Analytics logger over the configured backend
pub type RuntimeEventLogger = StoredEventLogger<DynStore>;

/// Build the key-value backend selected by `config`
pub async fn build_store(config: &StorageConfig) -> Result<DynStore, InfrastructureError> {
    let store: DynStore = match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
        StorageBackend::File => {
            let path = config.file_path.clone().ok_or_else(|| {
                InfrastructureError::Config("File storage requires a file_path".to_string())
            })?;
            Arc::new(FileKeyValueStore::open(path).await?)
        }
        #[cfg(feature = "redis-cache")]
        StorageBackend::Redis => {
            Arc::new(crate::cache::RedisKeyValueStore::connect(config.redis.clone()).await?)
        }
        #[cfg(not(feature = "redis-cache"))]
        StorageBackend::Redis => {
            return Err(InfrastructureError::Config(
                "Redis storage requires the redis-cache feature".to_string(),
            ))
        }
    };

    info!(backend = %config.backend, "Storage backend ready");
    Ok(store)
}

/// Fully wired OTP login services sharing one backend
pub struct OtpRuntime {
    /// Configuration the runtime was built from
    pub config: AppConfig,
    /// Shared key-value backend
    pub store: DynStore,
    /// Persisted analytics log
    pub analytics: Arc<RuntimeEventLogger>,
    /// OTP lifecycle manager
    pub manager: OtpManager<DynStore, RuntimeEventLogger>,
    /// Post-login session tracker
    pub sessions: SessionService<RuntimeEventLogger>,
}

impl OtpRuntime {
    /// Build every service from `config`
    pub async fn from_config(config: AppConfig) -> Result<Self, InfrastructureError> {
        let store = build_store(&config.storage).await?;
        Ok(Self::with_store(config, store).await)
    }

    /// Wire services over an already built backend
    pub async fn with_store(config: AppConfig, store: DynStore) -> Self {
        let shared = Arc::new(store.clone());

        let analytics = Arc::new(StoredEventLogger::new(shared.clone(), config.analytics.clone()));
        analytics.initialize().await;

        let manager = OtpManager::new(shared, analytics.clone(), config.otp.clone());
        let sessions = SessionService::new(analytics.clone());

        info!(
            environment = %config.environment,
            storage = %config.storage.backend,
            "OTP runtime initialized"
        );

        Self {
            config,
            store,
            analytics,
            manager,
            sessions,
        }
    }
}
