//! Server configuration module

use clap::Parser;
use mixdesk_app::config::AppConfig;

use crate::config::{
    auth::AuthConfig,
    cache::CacheSettings,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    plans::PlansConfig,
    server::ServerRuntimeConfig,
    upstream::UpstreamConfig,
};

pub(crate) mod auth;
pub(crate) mod cache;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod plans;
pub(crate) mod server;
pub(crate) mod upstream;

/// Mixdesk JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "mixdesk-json", about = "Mixdesk JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Redis cache settings.
    #[command(flatten)]
    pub cache: CacheSettings,

    /// Supabase authentication settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Third-party API settings.
    #[command(flatten)]
    pub upstream: UpstreamConfig,

    /// Plan resolution settings.
    #[command(flatten)]
    pub plans: PlansConfig,
}

/// Settings that parse but do not make sense.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PRICE_TIERS: {0}")]
    PriceTiers(#[from] mixdesk_app::domain::plans::tiers::PriceTierParseError),
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for the application services.
    ///
    /// # Errors
    ///
    /// Returns an error if the price tier overrides cannot be parsed.
    pub fn app_config(&self) -> Result<AppConfig, ConfigError> {
        Ok(AppConfig {
            database_url: self.database.database_url.clone(),
            cache: self.cache.cache_config(),
            supabase: self.auth.supabase_config(),
            stripe: self.upstream.stripe_config(),
            promotions: self.upstream.promotions_config(&self.cache),
            muso: self.upstream.muso_config(),
            webhook_timeout: self.upstream.webhook_timeout(),
            price_tiers: self.plans.price_tier_table()?,
        })
    }
}
