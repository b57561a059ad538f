//! Supabase Auth client for access token validation.

use std::time::Duration;

use reqwest::{Client, StatusCode, header::AUTHORIZATION};

use crate::auth::{AuthServiceError, AuthenticatedUser};

/// Configuration for connecting to a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `"https://abc.supabase.co"`.
    pub url: String,

    /// Public anon key sent as the `apikey` header.
    pub anon_key: String,

    /// Request timeout for identity lookups.
    pub timeout: Duration,
}

/// HTTP client for the Supabase Auth `user` endpoint.
#[derive(Debug, Clone)]
pub struct SupabaseAuthClient {
    config: SupabaseConfig,
    http: Client,
}

impl SupabaseAuthClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SupabaseConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    /// Resolve the user that owns `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::Unauthorized`] when the token is rejected,
    /// or a transport error on HTTP failure.
    pub async fn user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthServiceError> {
        let url = format!("{}/auth/v1/user", self.config.url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.config.anon_key)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthServiceError::Unauthorized),
            status => {
                let text = response.text().await.unwrap_or_default();

                Err(AuthServiceError::UnexpectedResponse(format!(
                    "user lookup failed with status {status}: {text}"
                )))
            }
        }
    }
}
