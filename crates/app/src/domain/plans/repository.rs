//! Plans Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::domain::{plans::records::PlanUsage, users::UserUuid};

const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");
const FIND_ACTIVE_PRICE_SQL: &str = include_str!("sql/find_active_price.sql");
const COUNT_USAGE_SQL: &str = include_str!("sql/count_usage.sql");

/// The parts of a user row that affect plan resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanAccount {
    pub affiliate_code: Option<String>,
}

impl PlanAccount {
    #[must_use]
    pub fn has_affiliate_code(&self) -> bool {
        self.affiliate_code
            .as_deref()
            .is_some_and(|code| !code.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct PgPlansRepository {
    pool: PgPool,
}

impl PgPlansRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, PgRow> for PlanAccount {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            affiliate_code: row.try_get("affiliate_code")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PlanUsage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            songs: count_column(row, "songs")?,
            players: count_column(row, "players")?,
            landing_pages: count_column(row, "landing_pages")?,
        })
    }
}

fn count_column(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let count: i64 = row.try_get(column)?;

    u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

#[async_trait]
impl PlansRepository for PgPlansRepository {
    async fn find_account(&self, user: UserUuid) -> Result<Option<PlanAccount>, sqlx::Error> {
        query_as::<Postgres, PlanAccount>(FIND_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_active_price(&self, user: UserUuid) -> Result<Option<String>, sqlx::Error> {
        query_scalar::<Postgres, Option<String>>(FIND_ACTIVE_PRICE_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
            .map(Option::flatten)
    }

    async fn count_usage(&self, user: UserUuid) -> Result<PlanUsage, sqlx::Error> {
        query_as::<Postgres, PlanUsage>(COUNT_USAGE_SQL)
            .bind(user.into_uuid())
            .fetch_one(&self.pool)
            .await
    }
}

#[automock]
#[async_trait]
pub trait PlansRepository: Send + Sync {
    /// Fetch the user row, `None` when the user does not exist.
    async fn find_account(&self, user: UserUuid) -> Result<Option<PlanAccount>, sqlx::Error>;

    /// Price of the newest active or trialing subscription.
    async fn find_active_price(&self, user: UserUuid) -> Result<Option<String>, sqlx::Error>;

    /// Count songs, players and landing pages owned by the user.
    async fn count_usage(&self, user: UserUuid) -> Result<PlanUsage, sqlx::Error>;
}
