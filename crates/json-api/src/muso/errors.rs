//! Muso Errors

use salvo::http::StatusError;
use tracing::error;

use mixdesk_app::domain::muso::MusoServiceError;

pub(crate) fn into_status_error(error: MusoServiceError) -> StatusError {
    match error {
        MusoServiceError::MissingProfile => {
            StatusError::bad_request().brief("profileId query parameter is required")
        }
        MusoServiceError::Unauthorized => {
            error!("muso rejected the configured api key");

            StatusError::unauthorized().brief("Muso credentials were rejected")
        }
        MusoServiceError::NotFound => StatusError::not_found().brief("Muso profile not found"),
        MusoServiceError::RateLimited => {
            StatusError::too_many_requests().brief("Muso rate limit exceeded, try again later")
        }
        MusoServiceError::Upstream(source) => {
            error!("failed to fetch muso profile: {source}");

            StatusError::internal_server_error()
        }
    }
}
