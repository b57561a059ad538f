use std::{sync::Arc, time::Duration};

use clap::{Args, Subcommand};
use mixdesk_app::{
    cache::{self, CacheConfig},
    domain::promotions::{
        CachedPromotionsService, HttpPromotionSource, PromotionTtls, source::DEFAULT_FETCH_TIMEOUT,
    },
};

mod clear;
mod show;

#[derive(Debug, Args)]
pub(crate) struct PromotionCommand {
    #[command(subcommand)]
    command: PromotionSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionSubcommand {
    /// Print the promotion payload the API would serve
    Show(show::ShowPromotionArgs),

    /// Drop the cached promotion so the next lookup goes upstream
    Clear(clear::ClearPromotionArgs),
}

/// Connection and cache policy flags shared by promotion commands.
///
/// Reads the same variables as the API server so entries written here follow
/// the server's TTL policy.
#[derive(Debug, Args)]
pub(crate) struct PromotionArgs {
    /// Redis connection string
    #[arg(long, env = "REDIS_URL", hide_env_values = true)]
    redis_url: String,

    /// Redis connection timeout in milliseconds
    #[arg(long, env = "REDIS_CONNECTION_TIMEOUT_MS", default_value_t = 2_000)]
    redis_connection_timeout_ms: u64,

    /// Redis command timeout in milliseconds
    #[arg(long, env = "REDIS_RESPONSE_TIMEOUT_MS", default_value_t = 1_000)]
    redis_response_timeout_ms: u64,

    /// Cache lifetime of an active promotion in seconds
    #[arg(long, env = "PROMOTION_CACHE_TTL_SECONDS", default_value_t = 300)]
    promotion_cache_ttl_seconds: u64,

    /// Cache lifetime of a "no promotion" answer in seconds
    #[arg(long, env = "PROMOTION_IDLE_CACHE_TTL_SECONDS", default_value_t = 3_600)]
    promotion_idle_cache_ttl_seconds: u64,

    /// Base URL of the marketing service
    #[arg(long, env = "PROMOTION_API_URL")]
    promotion_api_url: String,

    /// Upstream promotion fetch timeout in seconds
    #[arg(long, env = "PROMOTION_TIMEOUT_SECONDS", default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    promotion_timeout_seconds: u64,
}

impl PromotionArgs {
    fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            redis_url: self.redis_url.clone(),
            connection_timeout: Duration::from_millis(self.redis_connection_timeout_ms),
            response_timeout: Duration::from_millis(self.redis_response_timeout_ms),
        }
    }

    fn ttls(&self) -> PromotionTtls {
        PromotionTtls {
            active: Duration::from_secs(self.promotion_cache_ttl_seconds),
            idle: Duration::from_secs(self.promotion_idle_cache_ttl_seconds),
        }
    }

    async fn service(&self) -> Result<CachedPromotionsService, String> {
        let cache = cache::connect_or_disable(&self.cache_config()).await;

        let source = HttpPromotionSource::new(
            &self.promotion_api_url,
            Duration::from_secs(self.promotion_timeout_seconds),
        )
        .map_err(|error| format!("failed to build promotion client: {error}"))?;

        Ok(CachedPromotionsService::new(
            Arc::from(cache),
            Arc::new(source),
            self.ttls(),
        ))
    }
}

pub(crate) async fn run(command: PromotionCommand) -> Result<(), String> {
    match command.command {
        PromotionSubcommand::Show(args) => show::run(args).await,
        PromotionSubcommand::Clear(args) => clear::run(args).await,
    }
}
