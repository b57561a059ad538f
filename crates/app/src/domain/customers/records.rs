//! Customer Records

use serde::Deserialize;

use crate::domain::users::UserUuid;

/// New Customer Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub email: String,
    pub user: UserUuid,
}

/// Stripe customer linked to a portal user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub user: UserUuid,
    pub stripe_customer_id: String,

    /// `false` when an existing link was returned.
    pub created: bool,
}

/// Customer object returned by the Stripe API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StripeCustomer {
    pub id: String,
}
