//! Customers service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("stripe rejected the request ({status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Error)]
pub enum CustomersServiceError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),

    #[error("stripe error")]
    Stripe(#[from] StripeError),
}

impl From<sqlx::Error> for CustomersServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}
