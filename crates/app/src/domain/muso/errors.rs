//! Muso errors.

use thiserror::Error;

/// Failure talking to the Muso.ai API.
#[derive(Debug, Error)]
pub enum MusoApiError {
    #[error("muso returned status {0}")]
    Status(u16),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum MusoServiceError {
    #[error("no profile id given and no default configured")]
    MissingProfile,

    #[error("muso rejected the api key")]
    Unauthorized,

    #[error("muso profile not found")]
    NotFound,

    #[error("muso rate limit exceeded")]
    RateLimited,

    #[error("muso upstream error")]
    Upstream(#[source] MusoApiError),
}

impl From<MusoApiError> for MusoServiceError {
    fn from(error: MusoApiError) -> Self {
        match error {
            MusoApiError::Status(401 | 403) => Self::Unauthorized,
            MusoApiError::Status(404) => Self::NotFound,
            MusoApiError::Status(429) => Self::RateLimited,
            error @ (MusoApiError::Status(_) | MusoApiError::Http(_)) => Self::Upstream(error),
        }
    }
}
