//! Stripe customers API client.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::{
    customers::{errors::StripeError, records::StripeCustomer},
    users::UserUuid,
};

/// Metadata key linking a Stripe customer back to the portal user.
pub const USER_METADATA_KEY: &str = "metadata[supabaseUUID]";

const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Stripe replays the first response for a repeated key, so concurrent
/// signups for one user resolve to a single customer.
fn idempotency_key(user: UserUuid) -> String {
    format!("mixdesk-customer-{user}")
}

/// Configuration for the Stripe REST API.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// API root, `https://api.stripe.com` in production.
    pub api_url: String,

    /// Secret API key.
    pub secret_key: String,

    /// Request timeout.
    pub timeout: Duration,
}

#[automock]
#[async_trait]
pub trait StripeCustomers: Send + Sync {
    /// Create a customer for `email` tagged with the portal user id.
    async fn create_customer(
        &self,
        email: &str,
        user: UserUuid,
    ) -> Result<StripeCustomer, StripeError>;
}

/// HTTP client for the Stripe customers endpoint.
#[derive(Clone)]
pub struct StripeClient {
    config: StripeConfig,
    http: Client,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_url", &self.config.api_url)
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: StripeConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl StripeCustomers for StripeClient {
    async fn create_customer(
        &self,
        email: &str,
        user: UserUuid,
    ) -> Result<StripeCustomer, StripeError> {
        let url = format!("{}/v1/customers", self.config.api_url.trim_end_matches('/'));
        let user_id = user.to_string();

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key(user))
            .form(&[("email", email), (USER_METADATA_KEY, user_id.as_str())])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(StripeError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map_or_else(|_ignored| body.to_string(), |response| response.error.message)
}
