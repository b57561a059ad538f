//! Plans service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::warn;

use crate::domain::{
    plans::{
        PgPlansRepository, PlansRepository, PlansServiceError,
        records::UserPlanInfo,
        tiers::PriceTierTable,
    },
    users::UserUuid,
};

#[derive(Clone)]
pub struct PgPlansService {
    repository: Arc<dyn PlansRepository>,
    tiers: PriceTierTable,
}

impl std::fmt::Debug for PgPlansService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPlansService")
            .field("tiers", &self.tiers)
            .finish_non_exhaustive()
    }
}

impl PgPlansService {
    #[must_use]
    pub fn new(pool: PgPool, tiers: PriceTierTable) -> Self {
        Self::with_repository(Arc::new(PgPlansRepository::new(pool)), tiers)
    }

    #[must_use]
    pub fn with_repository(repository: Arc<dyn PlansRepository>, tiers: PriceTierTable) -> Self {
        Self { repository, tiers }
    }

    async fn resolve(&self, user: UserUuid) -> Result<UserPlanInfo, PlansServiceError> {
        let account = self
            .repository
            .find_account(user)
            .await?
            .ok_or(PlansServiceError::UserNotFound)?;

        let (price, usage) = tokio::try_join!(
            self.repository.find_active_price(user),
            self.repository.count_usage(user),
        )?;

        let plan = self.tiers.tier_for(price.as_deref());

        Ok(UserPlanInfo::new(plan, usage, account.has_affiliate_code()))
    }
}

#[async_trait]
impl PlansService for PgPlansService {
    async fn get_user_plan_info(&self, user: UserUuid) -> UserPlanInfo {
        match self.resolve(user).await {
            Ok(info) => info,
            Err(error) => {
                warn!(%user, "plan lookup failed, using free plan: {error}");

                UserPlanInfo::fallback()
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait PlansService: Send + Sync {
    /// Resolve the plan, limits and usage for a user.
    ///
    /// Never fails: any lookup problem resolves to [`UserPlanInfo::fallback`].
    async fn get_user_plan_info(&self, user: UserUuid) -> UserPlanInfo;
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::domain::plans::{
        MockPlansRepository, PlanAccount,
        records::{PlanTier, PlanUsage},
    };

    use crate::test::db::{TestDb, insert_owned_rows, insert_subscription, insert_user};

    use super::*;

    fn user() -> UserUuid {
        UserUuid::from_uuid(Uuid::now_v7())
    }

    fn service(repository: MockPlansRepository) -> PgPlansService {
        PgPlansService::with_repository(Arc::new(repository), PriceTierTable::default())
    }

    fn account(affiliate_code: Option<&str>) -> PlanAccount {
        PlanAccount {
            affiliate_code: affiliate_code.map(ToString::to_string),
        }
    }

    #[tokio::test]
    async fn resolves_tier_from_active_price() {
        let user = user();
        let mut repository = MockPlansRepository::new();

        repository
            .expect_find_account()
            .once()
            .withf(move |u| *u == user)
            .return_once(|_| Ok(Some(account(Some("FRIEND20")))));

        repository
            .expect_find_active_price()
            .once()
            .return_once(|_| Ok(Some("price_pro_yearly".to_string())));

        repository
            .expect_count_usage()
            .once()
            .return_once(|_| Ok(PlanUsage::new(12, 51, 0)));

        let info = service(repository).get_user_plan_info(user).await;

        assert_eq!(info.plan, PlanTier::Pro);
        assert_eq!(info.limits, PlanTier::Pro.limits());
        assert_eq!(info.usage, PlanUsage::new(12, 51, 0));
        assert!(!info.is_over_limit.songs);
        assert!(info.is_over_limit.players);
        assert!(info.has_affiliate_code);
    }

    #[tokio::test]
    async fn user_without_subscription_is_free_with_usage() {
        let mut repository = MockPlansRepository::new();

        repository
            .expect_find_account()
            .once()
            .return_once(|_| Ok(Some(account(None))));

        repository
            .expect_find_active_price()
            .once()
            .return_once(|_| Ok(None));

        repository
            .expect_count_usage()
            .once()
            .return_once(|_| Ok(PlanUsage::new(4, 1, 1)));

        let info = service(repository).get_user_plan_info(user()).await;

        assert_eq!(info.plan, PlanTier::Free);
        assert_eq!(info.usage, PlanUsage::new(4, 1, 1));
        assert!(info.is_over_limit.songs);
        assert!(!info.has_affiliate_code);
    }

    #[tokio::test]
    async fn unmapped_price_is_free() {
        let mut repository = MockPlansRepository::new();

        repository
            .expect_find_account()
            .once()
            .return_once(|_| Ok(Some(account(None))));

        repository
            .expect_find_active_price()
            .once()
            .return_once(|_| Ok(Some("price_legacy_2019".to_string())));

        repository
            .expect_count_usage()
            .once()
            .return_once(|_| Ok(PlanUsage::default()));

        let info = service(repository).get_user_plan_info(user()).await;

        assert_eq!(info.plan, PlanTier::Free);
        assert_eq!(info.limits, PlanTier::Free.limits());
    }

    #[tokio::test]
    async fn missing_user_falls_back_without_further_queries() {
        let mut repository = MockPlansRepository::new();

        repository
            .expect_find_account()
            .once()
            .return_once(|_| Ok(None));

        repository.expect_find_active_price().never();
        repository.expect_count_usage().never();

        let info = service(repository).get_user_plan_info(user()).await;

        assert_eq!(info, UserPlanInfo::fallback());
    }

    #[tokio::test]
    async fn query_errors_fall_back_to_free_with_zero_usage() {
        let mut repository = MockPlansRepository::new();

        repository
            .expect_find_account()
            .once()
            .return_once(|_| Ok(Some(account(Some("AFF")))));

        repository
            .expect_find_active_price()
            .once()
            .return_once(|_| Ok(Some("price_pro_monthly".to_string())));

        repository
            .expect_count_usage()
            .once()
            .return_once(|_| Err(sqlx::Error::PoolTimedOut));

        let info = service(repository).get_user_plan_info(user()).await;

        assert_eq!(info, UserPlanInfo::fallback());
    }

    #[tokio::test]
    async fn resolves_plan_from_database_rows() {
        let db = TestDb::new().await;
        let user = insert_user(db.pool(), None).await;

        insert_subscription(db.pool(), user, "active", "price_mixdesk_test", 0).await;
        insert_owned_rows(db.pool(), "songs", user, 26).await;

        let service = PgPlansService::new(
            db.pool().clone(),
            PriceTierTable::with_overrides(vec![("price_mixdesk_test".to_string(), PlanTier::Starter)]),
        );

        let info = service.get_user_plan_info(user).await;

        assert_eq!(info.plan, PlanTier::Starter);
        assert_eq!(info.usage, PlanUsage::new(26, 0, 0));
        assert!(info.is_over_limit.songs);
        assert!(!info.is_over_limit.players);
        assert!(!info.has_affiliate_code);
    }
}
