//! Customers service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::domain::customers::{
    CustomersRepository, CustomersServiceError, StripeCustomers,
    records::{CustomerRecord, NewCustomer},
};

#[derive(Clone)]
pub struct StripeCustomersService {
    repository: Arc<dyn CustomersRepository>,
    stripe: Arc<dyn StripeCustomers>,
}

impl std::fmt::Debug for StripeCustomersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeCustomersService").finish_non_exhaustive()
    }
}

impl StripeCustomersService {
    #[must_use]
    pub fn new(repository: Arc<dyn CustomersRepository>, stripe: Arc<dyn StripeCustomers>) -> Self {
        Self { repository, stripe }
    }
}

#[async_trait]
impl CustomersService for StripeCustomersService {
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let email = normalise_email(&customer.email).ok_or(CustomersServiceError::InvalidEmail)?;

        if let Some(stripe_customer_id) = self
            .repository
            .find_stripe_customer_id(customer.user)
            .await?
        {
            return Ok(CustomerRecord {
                user: customer.user,
                stripe_customer_id,
                created: false,
            });
        }

        let created = self.stripe.create_customer(email, customer.user).await?;

        let stripe_customer_id = self
            .repository
            .link_customer(customer.user, &created.id)
            .await?;

        if stripe_customer_id != created.id {
            warn!(
                user = %customer.user,
                orphan = %created.id,
                customer = %stripe_customer_id,
                "user was linked concurrently, keeping stored stripe customer"
            );

            return Ok(CustomerRecord {
                user: customer.user,
                stripe_customer_id,
                created: false,
            });
        }

        info!(user = %customer.user, customer = %stripe_customer_id, "created stripe customer");

        Ok(CustomerRecord {
            user: customer.user,
            stripe_customer_id,
            created: true,
        })
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Return the user's Stripe customer, creating and linking one if needed.
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;
}

fn normalise_email(email: &str) -> Option<&str> {
    let email = email.trim();
    let (local, domain) = email.split_once('@')?;

    let valid = !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);

    valid.then_some(email)
}
