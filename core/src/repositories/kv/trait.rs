//! Key-value store trait defining the persistence interface.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::DomainResult;

/// String blob storage keyed by string
///
/// This trait defines the contract the OTP manager and the analytics logger
/// persist through. Implementations should be durable across process
/// restarts where the backend allows it; callers treat every error as
/// recoverable and degrade instead of propagating.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` if present
    /// * `Ok(None)` if the key is absent
    /// * `Err(DomainError)` if the backend is unavailable
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Delete `key`; deleting an absent key is not an error
    async fn remove(&self, key: &str) -> DomainResult<()>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        (**self).remove(key).await
    }
}
