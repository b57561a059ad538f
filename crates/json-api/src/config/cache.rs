//! Cache Config

use std::time::Duration;

use clap::Args;
use mixdesk_app::{cache::CacheConfig, domain::promotions::PromotionTtls};

/// Redis cache settings.
#[derive(Debug, Args)]
pub struct CacheSettings {
    /// Redis connection string
    #[arg(long, env = "REDIS_URL", hide_env_values = true)]
    pub redis_url: String,

    /// Redis connection timeout in milliseconds
    #[arg(long, env = "REDIS_CONNECTION_TIMEOUT_MS", default_value_t = 2_000)]
    pub redis_connection_timeout_ms: u64,

    /// Redis command timeout in milliseconds
    #[arg(long, env = "REDIS_RESPONSE_TIMEOUT_MS", default_value_t = 1_000)]
    pub redis_response_timeout_ms: u64,

    /// Cache lifetime of an active promotion in seconds
    #[arg(long, env = "PROMOTION_CACHE_TTL_SECONDS", default_value_t = 300)]
    pub promotion_cache_ttl_seconds: u64,

    /// Cache lifetime of a "no promotion" answer in seconds
    #[arg(long, env = "PROMOTION_IDLE_CACHE_TTL_SECONDS", default_value_t = 3_600)]
    pub promotion_idle_cache_ttl_seconds: u64,
}

impl CacheSettings {
    pub(crate) fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            redis_url: self.redis_url.clone(),
            connection_timeout: Duration::from_millis(self.redis_connection_timeout_ms),
            response_timeout: Duration::from_millis(self.redis_response_timeout_ms),
        }
    }

    pub(crate) fn promotion_ttls(&self) -> PromotionTtls {
        PromotionTtls {
            active: Duration::from_secs(self.promotion_cache_ttl_seconds),
            idle: Duration::from_secs(self.promotion_idle_cache_ttl_seconds),
        }
    }
}
