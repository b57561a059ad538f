//! Key-value cache.
//!
//! Values are stored as opaque strings with a per-entry TTL. Redis is the only
//! real backend; [`DisabledCache`] stands in when Redis cannot be reached at
//! start-up so callers always fall through to their source of truth.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use redis::{
    AsyncCommands, Client, RedisError,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use thiserror::Error;
use tracing::warn;

/// Redis connection settings.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis connection string, e.g. `redis://localhost:6379`.
    pub redis_url: String,

    /// Timeout for establishing a connection.
    pub connection_timeout: Duration,

    /// Timeout for a single command round trip.
    pub response_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error")]
    Backend(#[from] RedisError),

    #[error("cache is disabled")]
    Disabled,
}

#[automock]
#[async_trait]
pub trait Cache: Send + Sync {
    /// Read a value, `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write a value that expires after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Remove a value. Returns `true` when a key was deleted.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;
}

#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Open a managed Redis connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the first connection fails.
    pub async fn connect(config: &CacheConfig) -> Result<Self, CacheError> {
        let manager_config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(config.connection_timeout)
            .set_response_timeout(config.response_timeout);

        let client = Client::open(config.redis_url.as_str())?;
        let connection = client
            .get_connection_manager_with_config(manager_config)
            .await?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut connection = self.connection.clone();
        let value: Option<String> = connection.get(key).await?;

        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();

        connection
            .set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
            .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let mut connection = self.connection.clone();
        let removed: u64 = connection.del(key).await?;

        Ok(removed > 0)
    }
}

/// Cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCache;

#[async_trait]
impl Cache for DisabledCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Disabled)
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Disabled)
    }

    async fn delete(&self, _key: &str) -> Result<bool, CacheError> {
        Err(CacheError::Disabled)
    }
}

/// Connect to Redis, falling back to [`DisabledCache`] when it is unreachable.
pub async fn connect_or_disable(config: &CacheConfig) -> Box<dyn Cache> {
    match RedisCache::connect(config).await {
        Ok(cache) => Box::new(cache),
        Err(error) => {
            warn!("redis unavailable, caching disabled: {error}");

            Box::new(DisabledCache)
        }
    }
}
