//! Promotion errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromotionSourceError {
    #[error("promotion request timed out")]
    Timeout,

    #[error("promotion service returned status {0}")]
    Status(u16),

    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),
}
