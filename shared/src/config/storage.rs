//! Key-value persistence backend configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::cache::CacheConfig;

/// Persistence backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map, lost on restart
    Memory,
    /// JSON document on local disk
    File,
    /// Redis server
    Redis,
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::Memory
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "file" | "disk" => Ok(StorageBackend::File),
            "redis" => Ok(StorageBackend::Redis),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Redis => write!(f, "redis"),
        }
    }
}

/// Persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Which backend to build
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path of the JSON document for the file backend
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Redis connection settings for the Redis backend
    #[serde(default)]
    pub redis: CacheConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::memory()
    }
}

impl StorageConfig {
    /// In-memory storage
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            file_path: None,
            redis: CacheConfig::default(),
        }
    }

    /// File storage at the given path
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::File,
            file_path: Some(path.into()),
            redis: CacheConfig::default(),
        }
    }

    /// Redis storage with the given connection settings
    pub fn redis(cache: CacheConfig) -> Self {
        Self {
            backend: StorageBackend::Redis,
            file_path: None,
            redis: cache,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let backend = std::env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let file_path = std::env::var("STORAGE_FILE_PATH")
            .ok()
            .map(PathBuf::from)
            .or_else(|| match backend {
                StorageBackend::File => Some(PathBuf::from("data/otp_store.json")),
                _ => None,
            });

        Self {
            backend,
            file_path,
            redis: CacheConfig::from_env(),
        }
    }
}
