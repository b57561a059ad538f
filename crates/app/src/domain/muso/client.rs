//! Muso.ai API client.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::domain::muso::errors::MusoApiError;

/// Header carrying the Muso.ai API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Configuration for the Muso.ai API.
#[derive(Debug, Clone)]
pub struct MusoConfig {
    pub api_url: Url,
    pub api_key: String,

    /// Profile served when a request names none.
    pub default_profile_id: Option<String>,

    pub timeout: Duration,
}

#[automock]
#[async_trait]
pub trait MusoApi: Send + Sync {
    async fn profile(&self, id: &str) -> Result<Value, MusoApiError>;

    async fn chart(&self, id: &str) -> Result<Value, MusoApiError>;
}

#[derive(Clone)]
pub struct MusoClient {
    api_url: Url,
    api_key: String,
    http: Client,
}

impl std::fmt::Debug for MusoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusoClient")
            .field("api_url", &self.api_url.as_str())
            .finish_non_exhaustive()
    }
}

impl MusoClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &MusoConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            http,
        })
    }

    /// URL of `/profile/{id}` followed by `extra` segments, with the id escaped.
    fn profile_url(&self, id: &str, extra: &[&str]) -> Url {
        let mut url = self.api_url.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("profile").push(id).extend(extra);
        }

        url
    }

    async fn get(&self, url: Url) -> Result<Value, MusoApiError> {
        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(MusoApiError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MusoApi for MusoClient {
    async fn profile(&self, id: &str) -> Result<Value, MusoApiError> {
        self.get(self.profile_url(id, &[])).await
    }

    async fn chart(&self, id: &str) -> Result<Value, MusoApiError> {
        self.get(self.profile_url(id, &["chart"])).await
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn client(api_url: &str) -> Result<MusoClient, Box<dyn std::error::Error>> {
        Ok(MusoClient::new(&MusoConfig {
            api_url: Url::parse(api_url)?,
            api_key: "key".to_string(),
            default_profile_id: None,
            timeout: Duration::from_millis(200),
        })?)
    }

    #[test]
    fn builds_profile_and_chart_urls() -> TestResult {
        let client = client("https://api.muso.ai/v4/")?;

        assert_eq!(
            client.profile_url("abc", &[]).as_str(),
            "https://api.muso.ai/v4/profile/abc"
        );
        assert_eq!(
            client.profile_url("abc", &["chart"]).as_str(),
            "https://api.muso.ai/v4/profile/abc/chart"
        );

        Ok(())
    }

    #[test]
    fn escapes_profile_ids() -> TestResult {
        let client = client("https://api.muso.ai/v4")?;

        assert_eq!(
            client.profile_url("../admin?x=1", &[]).as_str(),
            "https://api.muso.ai/v4/profile/..%2Fadmin%3Fx=1"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_http_error() -> TestResult {
        let client = client("http://127.0.0.1:9")?;

        assert!(matches!(
            client.profile("abc").await,
            Err(MusoApiError::Http(_))
        ));

        Ok(())
    }
}
