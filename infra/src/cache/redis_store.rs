//! Redis-backed key-value store
//!
//! Each logical key is stored as a plain Redis string, namespaced with the
//! configured key prefix so several deployments can share one server.

use async_trait::async_trait;

use otp_core::errors::DomainResult;
use otp_core::repositories::KeyValueStore;
use otp_shared::config::CacheConfig;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// `KeyValueStore` implementation on top of [`RedisClient`]
#[derive(Clone)]
pub struct RedisKeyValueStore {
    client: RedisClient,
}

impl RedisKeyValueStore {
    /// Wrap an existing client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Connect and wrap a new client
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Ok(Self::new(RedisClient::new(config).await?))
    }

    /// Underlying client
    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    /// Full Redis key for a logical key
    pub fn redis_key(&self, key: &str) -> String {
        self.client.config().make_key(key)
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.client.get(&self.redis_key(key)).await?)
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        Ok(self.client.set(&self.redis_key(key), value).await?)
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.client.delete(&self.redis_key(key)).await?;
        Ok(())
    }
}
