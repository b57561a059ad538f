//! Webhook errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhooksServiceError {
    #[error("webhook url is not a valid url")]
    InvalidUrl(#[from] url::ParseError),

    #[error("webhook url must use https")]
    InsecureUrl,

    #[error("form name is required")]
    MissingFormName,

    #[error("webhook did not respond in time")]
    Timeout,

    #[error("webhook delivery failed: {0}")]
    Delivery(#[source] reqwest::Error),
}

impl From<reqwest::Error> for WebhooksServiceError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Delivery(error)
        }
    }
}
