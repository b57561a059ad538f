//! Webhooks service.

use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use reqwest::Client;
use tracing::info;
use url::Url;

use crate::domain::webhooks::{
    WebhooksServiceError, build_test_payload,
    records::{WebhookOutcome, WebhookTest},
};

/// Delivery timeout for test submissions.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpWebhooksService {
    http: Client,
}

impl HttpWebhooksService {
    /// Create a service that gives each delivery `timeout` to complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl WebhooksService for HttpWebhooksService {
    async fn send_test(&self, test: WebhookTest) -> Result<WebhookOutcome, WebhooksServiceError> {
        let url = validate_url(&test.url)?;

        let form_name = test.form_name.trim();

        if form_name.is_empty() {
            return Err(WebhooksServiceError::MissingFormName);
        }

        let payload = build_test_payload(form_name, &test.fields, Timestamp::now());

        let response = self.http.post(url.clone()).json(&payload).send().await?;
        let status = response.status();

        info!(host = url.host_str().unwrap_or_default(), status = status.as_u16(), "test webhook delivered");

        Ok(WebhookOutcome {
            success: status.is_success(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }
}

#[automock]
#[async_trait]
pub trait WebhooksService: Send + Sync {
    /// Post a synthetic submission of the form to its webhook.
    async fn send_test(&self, test: WebhookTest) -> Result<WebhookOutcome, WebhooksServiceError>;
}

fn validate_url(raw: &str) -> Result<Url, WebhooksServiceError> {
    let url = Url::parse(raw.trim())?;

    if url.scheme() != "https" {
        return Err(WebhooksServiceError::InsecureUrl);
    }

    Ok(url)
}
