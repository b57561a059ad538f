//! Create Stripe Customer Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mixdesk_app::domain::customers::records::NewCustomer;

use crate::{customers::errors::into_status_error, extensions::*, state::State};

/// Create Stripe Customer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateStripeCustomerRequest {
    pub email: Option<String>,

    /// Portal user UUID
    pub uuid: Option<String>,
}

impl TryFrom<CreateStripeCustomerRequest> for NewCustomer {
    type Error = StatusError;

    fn try_from(request: CreateStripeCustomerRequest) -> Result<Self, Self::Error> {
        let email = request
            .email
            .filter(|email| !email.trim().is_empty())
            .or_400("Email is required")?;

        let user = request
            .uuid
            .and_then(|uuid| uuid.trim().parse::<Uuid>().ok())
            .or_400("A valid user UUID is required")?;

        Ok(NewCustomer {
            email,
            user: user.into(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StripeCustomerResponse {
    pub success: bool,

    /// Withheld for an existing link unless the caller is signed in as its user.
    pub customer_id: Option<String>,
}

/// Create Stripe Customer Handler
///
/// Creates a Stripe customer for the user and links it, or returns the
/// customer already linked. An optional bearer token identifies the caller.
#[endpoint(
    tags("customers"),
    summary = "Create Stripe Customer",
    responses(
        (status_code = StatusCode::OK, description = "Customer created or already linked"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateStripeCustomerRequest>,
    depot: &mut Depot,
) -> Result<Json<StripeCustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = NewCustomer::try_from(json.into_inner())?;

    let record = state
        .app
        .customers
        .create_customer(customer)
        .await
        .map_err(into_status_error)?;

    let caller = depot.user_uuid_or_401().ok();
    let visible = record.created || caller == Some(record.user);

    Ok(Json(StripeCustomerResponse {
        success: true,
        customer_id: visible.then_some(record.stripe_customer_id),
    }))
}
