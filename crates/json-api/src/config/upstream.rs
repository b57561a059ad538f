//! Upstream API Config

use std::time::Duration;

use clap::Args;
use mixdesk_app::{
    config::PromotionsConfig,
    domain::{customers::StripeConfig, muso::MusoConfig},
};
use url::Url;

use crate::config::cache::CacheSettings;

/// Third-party API settings.
#[derive(Debug, Args)]
pub struct UpstreamConfig {
    /// Stripe secret key
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: String,

    /// Stripe API root
    #[arg(long, env = "STRIPE_API_URL", default_value = "https://api.stripe.com")]
    pub stripe_api_url: String,

    /// Stripe request timeout in seconds
    #[arg(long, env = "STRIPE_TIMEOUT_SECONDS", default_value_t = 10)]
    pub stripe_timeout_seconds: u64,

    /// Base URL of the marketing service serving promotions
    #[arg(long, env = "PROMOTION_API_URL")]
    pub promotion_api_url: String,

    /// Promotion fetch timeout in seconds
    #[arg(long, env = "PROMOTION_TIMEOUT_SECONDS", default_value_t = 10)]
    pub promotion_timeout_seconds: u64,

    /// Muso.ai API root
    #[arg(long, env = "MUSO_API_URL", default_value = "https://api.developer.muso.ai/v4")]
    pub muso_api_url: Url,

    /// Muso.ai API key
    #[arg(long, env = "MUSO_API_KEY", hide_env_values = true)]
    pub muso_api_key: String,

    /// Profile served when `profileId` is omitted
    #[arg(long, env = "MUSO_DEFAULT_PROFILE_ID")]
    pub muso_default_profile_id: Option<String>,

    /// Muso.ai request timeout in seconds
    #[arg(long, env = "MUSO_TIMEOUT_SECONDS", default_value_t = 10)]
    pub muso_timeout_seconds: u64,

    /// Webhook test delivery timeout in seconds
    #[arg(long, env = "WEBHOOK_TIMEOUT_SECONDS", default_value_t = 10)]
    pub webhook_timeout_seconds: u64,
}

impl UpstreamConfig {
    pub(crate) fn stripe_config(&self) -> StripeConfig {
        StripeConfig {
            api_url: self.stripe_api_url.clone(),
            secret_key: self.stripe_secret_key.clone(),
            timeout: Duration::from_secs(self.stripe_timeout_seconds),
        }
    }

    pub(crate) fn promotions_config(&self, cache: &CacheSettings) -> PromotionsConfig {
        PromotionsConfig {
            api_url: self.promotion_api_url.clone(),
            timeout: Duration::from_secs(self.promotion_timeout_seconds),
            ttls: cache.promotion_ttls(),
        }
    }

    pub(crate) fn muso_config(&self) -> MusoConfig {
        MusoConfig {
            api_url: self.muso_api_url.clone(),
            api_key: self.muso_api_key.clone(),
            default_profile_id: self.muso_default_profile_id.clone(),
            timeout: Duration::from_secs(self.muso_timeout_seconds),
        }
    }

    pub(crate) fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_seconds)
    }
}
