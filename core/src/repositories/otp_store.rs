//! Persistence of the identity -> OTP record map as one blob.
//!
//! Every failure is caught here: a missing, unreadable or corrupt blob loads
//! as an empty map, and a failed write is logged and dropped. Durability is
//! traded for availability; a dropped write means the previous state stays
//! on disk while the caller continues with the new one.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::domain::entities::otp_record::OtpStore;
use crate::errors::DomainResult;
use crate::repositories::KeyValueStore;

/// Loads and saves the whole OTP store under a single key
pub struct OtpStoreRepository<S: KeyValueStore> {
    store: Arc<S>,
    key: String,
}

impl<S: KeyValueStore> OtpStoreRepository<S> {
    /// Create a repository persisting under `key`
    pub fn new(store: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the full map, degrading to empty on any failure
    pub async fn load(&self) -> OtpStore {
        match self.try_load().await {
            Ok(map) => map,
            Err(e) => {
                error!(
                    key = %self.key,
                    error = %e,
                    event = "otp_storage_load_failed",
                    "Error loading OTP storage, continuing with an empty store"
                );
                OtpStore::new()
            }
        }
    }

    /// Save the full map, logging and dropping any failure
    pub async fn save(&self, map: &OtpStore) {
        if let Err(e) = self.try_save(map).await {
            error!(
                key = %self.key,
                error = %e,
                records = map.len(),
                event = "otp_storage_save_failed",
                "Error saving OTP storage, write dropped"
            );
        }
    }

    /// Remove the stored blob entirely
    pub async fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key).await {
            error!(
                key = %self.key,
                error = %e,
                event = "otp_storage_clear_failed",
                "Error clearing OTP storage"
            );
        }
    }

    async fn try_load(&self) -> DomainResult<OtpStore> {
        let Some(blob) = self.store.get(&self.key).await? else {
            debug!(key = %self.key, "No OTP storage blob present");
            return Ok(OtpStore::new());
        };

        match serde_json::from_str::<OtpStore>(&blob) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!(
                    key = %self.key,
                    error = %e,
                    event = "otp_storage_corrupt",
                    "OTP storage blob is not a valid record map, treating as empty"
                );
                Ok(OtpStore::new())
            }
        }
    }

    async fn try_save(&self, map: &OtpStore) -> DomainResult<()> {
        let blob = serde_json::to_string(map)?;
        self.store.set(&self.key, &blob).await
    }
}
