//! Plans service errors.

use sqlx::Error;
use thiserror::Error;

/// Reasons a plan lookup fell back to the free tier.
#[derive(Debug, Error)]
pub enum PlansServiceError {
    #[error("user not found")]
    UserNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PlansServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
