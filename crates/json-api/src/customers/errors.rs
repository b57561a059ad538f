//! Customer Errors

use salvo::http::StatusError;
use tracing::error;

use mixdesk_app::domain::customers::{CustomersServiceError, StripeError};

pub(crate) fn into_status_error(error: CustomersServiceError) -> StatusError {
    match error {
        CustomersServiceError::InvalidEmail => {
            StatusError::bad_request().brief("A valid email address is required")
        }
        CustomersServiceError::Stripe(StripeError::Api { status, message })
            if (400..500).contains(&status) && status != 401 && status != 429 =>
        {
            error!("stripe rejected customer ({status}): {message}");

            StatusError::bad_request().brief("Customer details were rejected by Stripe")
        }
        CustomersServiceError::Stripe(source) => {
            error!("failed to create stripe customer: {source}");

            StatusError::internal_server_error()
        }
        CustomersServiceError::Sql(source) => {
            error!("failed to link stripe customer: {source}");

            StatusError::internal_server_error()
        }
    }
}
