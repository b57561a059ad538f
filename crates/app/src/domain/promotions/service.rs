//! Promotions service.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, error, warn};

use crate::{
    cache::{Cache, CacheError},
    domain::promotions::{
        records::{ActivePromotion, PayloadOrigin, PromotionPayload},
        source::PromotionSource,
    },
};

/// Cache key holding the serialized active promotion.
pub const PROMOTION_CACHE_KEY: &str = "active-promotion";

/// Body served when no promotion can be determined.
pub const EMPTY_PROMOTION_BODY: &str = r#"{"promotion":null}"#;

/// Cache lifetimes for promotion lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionTtls {
    /// Lifetime of a cached active promotion.
    pub active: Duration,

    /// Lifetime of a cached "no promotion" answer.
    pub idle: Duration,
}

impl Default for PromotionTtls {
    fn default() -> Self {
        Self {
            active: Duration::from_secs(300),
            idle: Duration::from_secs(3_600),
        }
    }
}

impl PromotionTtls {
    #[must_use]
    pub const fn for_promotion(&self, promotion: &ActivePromotion) -> Duration {
        if promotion.is_active() {
            self.active
        } else {
            self.idle
        }
    }
}

/// Read-through cache in front of a [`PromotionSource`].
#[derive(Clone)]
pub struct CachedPromotionsService {
    cache: Arc<dyn Cache>,
    source: Arc<dyn PromotionSource>,
    ttls: PromotionTtls,
}

impl std::fmt::Debug for CachedPromotionsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedPromotionsService")
            .field("ttls", &self.ttls)
            .finish_non_exhaustive()
    }
}

impl CachedPromotionsService {
    #[must_use]
    pub fn new(
        cache: Arc<dyn Cache>,
        source: Arc<dyn PromotionSource>,
        ttls: PromotionTtls,
    ) -> Self {
        Self {
            cache,
            source,
            ttls,
        }
    }

    fn fallback() -> PromotionPayload {
        PromotionPayload {
            body: EMPTY_PROMOTION_BODY.to_string(),
            origin: PayloadOrigin::Fallback,
        }
    }
}

#[async_trait]
impl PromotionsService for CachedPromotionsService {
    async fn active_promotion(&self) -> PromotionPayload {
        match self.cache.get(PROMOTION_CACHE_KEY).await {
            Ok(Some(body)) => {
                return PromotionPayload {
                    body,
                    origin: PayloadOrigin::Cache,
                };
            }
            Ok(None) => debug!("promotion cache miss"),
            Err(error) => warn!("promotion cache read failed: {error}"),
        }

        let promotion = match self.source.fetch_active().await {
            Ok(promotion) => ActivePromotion { promotion },
            Err(error) => {
                warn!("promotion fetch failed: {error}");

                return Self::fallback();
            }
        };

        let body = match serde_json::to_string(&promotion) {
            Ok(body) => body,
            Err(error) => {
                error!("failed to serialize promotion: {error}");

                return Self::fallback();
            }
        };

        let ttl = self.ttls.for_promotion(&promotion);

        if let Err(error) = self.cache.set_ex(PROMOTION_CACHE_KEY, &body, ttl).await {
            warn!("promotion cache write failed: {error}");
        }

        PromotionPayload {
            body,
            origin: PayloadOrigin::Upstream,
        }
    }

    async fn invalidate(&self) -> Result<bool, CacheError> {
        self.cache.delete(PROMOTION_CACHE_KEY).await
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Serialized `{"promotion": ...}` body. Never fails.
    async fn active_promotion(&self) -> PromotionPayload;

    /// Drop the cached answer so the next lookup goes upstream.
    async fn invalidate(&self) -> Result<bool, CacheError>;
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::{
        cache::MockCache,
        domain::promotions::{
            errors::PromotionSourceError, records::Promotion, source::MockPromotionSource,
        },
        test::MemoryCache,
    };

    use super::*;

    fn promotion() -> Promotion {
        Promotion {
            name: "Summer".to_string(),
            code: "SUMMER10".to_string(),
            start_date: None,
            end_date: None,
            discount_amount: Some(10.0),
            discount_type: None,
            applies_to_monthly: true,
            applies_to_yearly: true,
            active: true,
        }
    }

    fn service(cache: impl Cache + 'static, source: MockPromotionSource) -> CachedPromotionsService {
        CachedPromotionsService::new(Arc::new(cache), Arc::new(source), PromotionTtls::default())
    }

    #[tokio::test]
    async fn cache_hit_is_served_verbatim_without_fetching() {
        let cached = r#"{ "promotion" : {"name":"Cached","code":"C","active":true} }"#;

        let mut cache = MockCache::new();

        cache
            .expect_get()
            .once()
            .withf(|key| key == PROMOTION_CACHE_KEY)
            .return_once(move |_| Ok(Some(cached.to_string())));

        cache.expect_set_ex().never();

        let mut source = MockPromotionSource::new();

        source.expect_fetch_active().never();

        let payload = service(cache, source).active_promotion().await;

        assert_eq!(payload.body, cached);
        assert_eq!(payload.origin, PayloadOrigin::Cache);
    }

    #[tokio::test]
    async fn active_promotion_is_cached_with_short_ttl() -> TestResult {
        let mut cache = MockCache::new();

        cache.expect_get().once().return_once(|_| Ok(None));

        cache
            .expect_set_ex()
            .once()
            .withf(|key, _, ttl| key == PROMOTION_CACHE_KEY && *ttl == Duration::from_secs(300))
            .return_once(|_, _, _| Ok(()));

        let mut source = MockPromotionSource::new();

        source
            .expect_fetch_active()
            .once()
            .return_once(|| Ok(Some(promotion())));

        let payload = service(cache, source).active_promotion().await;
        let body: Value = serde_json::from_str(&payload.body)?;

        assert_eq!(payload.origin, PayloadOrigin::Upstream);
        assert_eq!(body["promotion"]["code"], json!("SUMMER10"));

        Ok(())
    }

    #[tokio::test]
    async fn no_promotion_is_cached_with_long_ttl() {
        let mut cache = MockCache::new();

        cache.expect_get().once().return_once(|_| Ok(None));

        cache
            .expect_set_ex()
            .once()
            .withf(|key, value, ttl| {
                key == PROMOTION_CACHE_KEY
                    && value == EMPTY_PROMOTION_BODY
                    && *ttl == Duration::from_secs(3_600)
            })
            .return_once(|_, _, _| Ok(()));

        let mut source = MockPromotionSource::new();

        source.expect_fetch_active().once().return_once(|| Ok(None));

        let payload = service(cache, source).active_promotion().await;

        assert_eq!(payload.body, EMPTY_PROMOTION_BODY);
        assert_eq!(payload.origin, PayloadOrigin::Upstream);
    }

    #[tokio::test]
    async fn upstream_failures_serve_empty_body_without_caching() {
        for failure in [
            PromotionSourceError::Timeout,
            PromotionSourceError::Status(502),
        ] {
            let mut cache = MockCache::new();

            cache.expect_get().once().return_once(|_| Ok(None));
            cache.expect_set_ex().never();

            let mut source = MockPromotionSource::new();

            source
                .expect_fetch_active()
                .once()
                .return_once(move || Err(failure));

            let payload = service(cache, source).active_promotion().await;

            assert_eq!(payload.body, EMPTY_PROMOTION_BODY);
            assert_eq!(payload.origin, PayloadOrigin::Fallback);
        }
    }

    #[tokio::test]
    async fn cache_errors_fall_through_to_upstream() {
        let mut cache = MockCache::new();

        cache
            .expect_get()
            .once()
            .return_once(|_| Err(CacheError::Disabled));

        cache
            .expect_set_ex()
            .once()
            .return_once(|_, _, _| Err(CacheError::Disabled));

        let mut source = MockPromotionSource::new();

        source
            .expect_fetch_active()
            .once()
            .return_once(|| Ok(Some(promotion())));

        let payload = service(cache, source).active_promotion().await;

        assert_eq!(payload.origin, PayloadOrigin::Upstream);
        assert!(payload.body.contains("SUMMER10"));
    }

    #[tokio::test]
    async fn repeated_lookups_within_ttl_are_byte_identical() {
        let mut source = MockPromotionSource::new();

        source
            .expect_fetch_active()
            .once()
            .return_once(|| Ok(Some(promotion())));

        let service = service(MemoryCache::default(), source);

        let first = service.active_promotion().await;
        let second = service.active_promotion().await;
        let third = service.active_promotion().await;

        assert_eq!(first.origin, PayloadOrigin::Upstream);
        assert_eq!(second.origin, PayloadOrigin::Cache);
        assert_eq!(first.body, second.body);
        assert_eq!(second.body, third.body);
    }

    #[tokio::test]
    async fn invalidate_deletes_the_cache_key() -> TestResult {
        let mut cache = MockCache::new();

        cache
            .expect_delete()
            .once()
            .withf(|key| key == PROMOTION_CACHE_KEY)
            .return_once(|_| Ok(true));

        let removed = service(cache, MockPromotionSource::new())
            .invalidate()
            .await?;

        assert!(removed);

        Ok(())
    }

    #[test]
    fn empty_body_matches_serialized_none() -> TestResult {
        assert_eq!(
            serde_json::to_string(&ActivePromotion::none())?,
            EMPTY_PROMOTION_BODY
        );

        Ok(())
    }
}
