//! Webhook Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use mixdesk_app::domain::webhooks::WebhooksServiceError;

pub(crate) fn into_status_error(error: WebhooksServiceError) -> StatusError {
    match error {
        WebhooksServiceError::InvalidUrl(_) => {
            StatusError::bad_request().brief("webhookUrl must be a valid URL")
        }
        WebhooksServiceError::InsecureUrl => {
            StatusError::bad_request().brief("webhookUrl must use https")
        }
        WebhooksServiceError::MissingFormName => {
            StatusError::bad_request().brief("formName is required")
        }
        WebhooksServiceError::Timeout => {
            warn!("test webhook timed out");

            StatusError::request_timeout().brief("Webhook did not respond in time")
        }
        WebhooksServiceError::Delivery(source) => {
            error!("failed to deliver test webhook: {source}");

            StatusError::internal_server_error().brief("Webhook delivery failed")
        }
    }
}
