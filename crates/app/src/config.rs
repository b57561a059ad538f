//! Application configuration
//!
//! Plain settings consumed by [`AppContext`](crate::context::AppContext).
//! Parsing from the environment happens in the binaries.

use std::time::Duration;

use crate::{
    auth::SupabaseConfig,
    cache::CacheConfig,
    domain::{
        customers::StripeConfig,
        muso::MusoConfig,
        plans::tiers::PriceTierTable,
        promotions::PromotionTtls,
    },
};

/// Marketing service promotion settings.
#[derive(Debug, Clone)]
pub struct PromotionsConfig {
    /// Base URL of the service exposing `/api/promotions/active`.
    pub api_url: String,

    pub timeout: Duration,
    pub ttls: PromotionTtls,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub cache: CacheConfig,
    pub supabase: SupabaseConfig,
    pub stripe: StripeConfig,
    pub promotions: PromotionsConfig,
    pub muso: MusoConfig,

    /// Delivery timeout for webhook tests.
    pub webhook_timeout: Duration,

    pub price_tiers: PriceTierTable,
}
