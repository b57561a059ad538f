//! Customers Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, Postgres, query_scalar};

use crate::domain::users::UserUuid;

const FIND_STRIPE_CUSTOMER_ID_SQL: &str = include_str!("sql/find_stripe_customer_id.sql");
const LINK_CUSTOMER_SQL: &str = include_str!("sql/link_customer.sql");

#[derive(Debug, Clone)]
pub struct PgCustomersRepository {
    pool: PgPool,
}

impl PgCustomersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomersRepository for PgCustomersRepository {
    async fn find_stripe_customer_id(&self, user: UserUuid) -> Result<Option<String>, sqlx::Error> {
        query_scalar::<Postgres, Option<String>>(FIND_STRIPE_CUSTOMER_ID_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
            .map(Option::flatten)
    }

    async fn link_customer(
        &self,
        user: UserUuid,
        stripe_customer_id: &str,
    ) -> Result<String, sqlx::Error> {
        let linked = query_scalar::<Postgres, String>(LINK_CUSTOMER_SQL)
            .bind(user.into_uuid())
            .bind(stripe_customer_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(linked) = linked {
            return Ok(linked);
        }

        // A concurrent request linked first; its row is visible to a fresh statement.
        self.find_stripe_customer_id(user)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }
}

#[automock]
#[async_trait]
pub trait CustomersRepository: Send + Sync {
    /// Stripe customer id already linked to the user, if any.
    async fn find_stripe_customer_id(&self, user: UserUuid) -> Result<Option<String>, sqlx::Error>;

    /// Link the user to a Stripe customer unless a link already exists.
    ///
    /// Returns the stored id, which is the existing one when another request won.
    async fn link_customer(
        &self,
        user: UserUuid,
        stripe_customer_id: &str,
    ) -> Result<String, sqlx::Error>;
}
