//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, SupabaseAuthClient, SupabaseAuthService},
    cache::{self, Cache},
    config::AppConfig,
    database,
    domain::{
        customers::{CustomersService, PgCustomersRepository, StripeClient, StripeCustomersService},
        muso::{MusoClient, MusoService, ProxyMusoService},
        plans::{PgPlansService, PlansService},
        promotions::{CachedPromotionsService, HttpPromotionSource, PromotionsService},
        webhooks::{HttpWebhooksService, WebhooksService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to build {client} client")]
    HttpClient {
        client: &'static str,

        #[source]
        source: reqwest::Error,
    },
}

fn http_client<T>(client: &'static str, result: Result<T, reqwest::Error>) -> Result<T, AppInitError> {
    result.map_err(|source| AppInitError::HttpClient { client, source })
}

#[derive(Clone)]
pub struct AppContext {
    pub plans: Arc<dyn PlansService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub customers: Arc<dyn CustomersService>,
    pub muso: Arc<dyn MusoService>,
    pub webhooks: Arc<dyn WebhooksService>,
    pub auth: Arc<dyn AuthService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// Redis being unreachable is not an error; promotions are then served
    /// without caching.
    ///
    /// # Errors
    ///
    /// Returns an error when the database connection fails or an HTTP client
    /// cannot be built.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let cache: Arc<dyn Cache> = Arc::from(cache::connect_or_disable(&config.cache).await);

        let source = http_client(
            "promotion",
            HttpPromotionSource::new(&config.promotions.api_url, config.promotions.timeout),
        )?;

        let stripe = http_client("stripe", StripeClient::new(config.stripe))?;
        let muso = http_client("muso", MusoClient::new(&config.muso))?;
        let webhooks = http_client("webhook", HttpWebhooksService::new(config.webhook_timeout))?;
        let supabase = http_client("supabase", SupabaseAuthClient::new(config.supabase))?;

        Ok(Self {
            plans: Arc::new(PgPlansService::new(pool.clone(), config.price_tiers)),
            promotions: Arc::new(CachedPromotionsService::new(
                cache,
                Arc::new(source),
                config.promotions.ttls,
            )),
            customers: Arc::new(StripeCustomersService::new(
                Arc::new(PgCustomersRepository::new(pool)),
                Arc::new(stripe),
            )),
            muso: Arc::new(ProxyMusoService::new(
                Arc::new(muso),
                config.muso.default_profile_id,
            )),
            webhooks: Arc::new(webhooks),
            auth: Arc::new(SupabaseAuthService::new(supabase)),
        })
    }
}
