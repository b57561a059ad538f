//! Muso service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use tracing::warn;

use crate::domain::muso::{MusoApi, MusoServiceError, records::MusoOverview};

#[derive(Clone)]
pub struct ProxyMusoService {
    api: Arc<dyn MusoApi>,
    default_profile_id: Option<String>,
}

impl std::fmt::Debug for ProxyMusoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyMusoService")
            .field("default_profile_id", &self.default_profile_id)
            .finish_non_exhaustive()
    }
}

impl ProxyMusoService {
    #[must_use]
    pub fn new(api: Arc<dyn MusoApi>, default_profile_id: Option<String>) -> Self {
        Self {
            api,
            default_profile_id: default_profile_id.filter(|id| !id.trim().is_empty()),
        }
    }

    fn profile_id(&self, requested: Option<String>) -> Option<String> {
        requested
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .or_else(|| self.default_profile_id.clone())
    }
}

#[async_trait]
impl MusoService for ProxyMusoService {
    async fn overview(&self, profile_id: Option<String>) -> Result<MusoOverview, MusoServiceError> {
        let id = self
            .profile_id(profile_id)
            .ok_or(MusoServiceError::MissingProfile)?;

        let (profile, chart) = tokio::join!(self.api.profile(&id), self.api.chart(&id));

        let chart = chart.unwrap_or_else(|error| {
            warn!(profile = %id, "muso chart unavailable: {error}");

            Value::Null
        });

        Ok(MusoOverview {
            profile: profile?,
            chart,
        })
    }
}

#[automock]
#[async_trait]
pub trait MusoService: Send + Sync {
    /// Profile and chart for `profile_id`, or for the default profile when `None`.
    async fn overview(&self, profile_id: Option<String>) -> Result<MusoOverview, MusoServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::muso::{MockMusoApi, MusoApiError};

    use super::*;

    #[tokio::test]
    async fn combines_profile_and_chart() -> TestResult {
        let mut api = MockMusoApi::new();

        api.expect_profile()
            .once()
            .withf(|id| id == "artist-1")
            .return_once(|_| Ok(json!({"name": "Artist"})));

        api.expect_chart()
            .once()
            .withf(|id| id == "artist-1")
            .return_once(|_| Ok(json!([{"week": 1}])));

        let overview = ProxyMusoService::new(Arc::new(api), None)
            .overview(Some(" artist-1 ".to_string()))
            .await?;

        assert_eq!(overview.profile, json!({"name": "Artist"}));
        assert_eq!(overview.chart, json!([{"week": 1}]));

        Ok(())
    }

    #[tokio::test]
    async fn falls_back_to_default_profile() -> TestResult {
        let mut api = MockMusoApi::new();

        api.expect_profile()
            .once()
            .withf(|id| id == "house")
            .return_once(|_| Ok(json!({})));

        api.expect_chart().once().return_once(|_| Ok(json!([])));

        ProxyMusoService::new(Arc::new(api), Some("house".to_string()))
            .overview(Some(String::new()))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn missing_profile_never_calls_upstream() {
        let mut api = MockMusoApi::new();

        api.expect_profile().never();
        api.expect_chart().never();

        let result = ProxyMusoService::new(Arc::new(api), Some("  ".to_string()))
            .overview(None)
            .await;

        assert!(matches!(result, Err(MusoServiceError::MissingProfile)));
    }

    #[tokio::test]
    async fn chart_failure_degrades_to_null() -> TestResult {
        let mut api = MockMusoApi::new();

        api.expect_profile()
            .once()
            .return_once(|_| Ok(json!({"name": "Artist"})));

        api.expect_chart()
            .once()
            .return_once(|_| Err(MusoApiError::Status(500)));

        let overview = ProxyMusoService::new(Arc::new(api), None)
            .overview(Some("artist-1".to_string()))
            .await?;

        assert_eq!(overview.chart, Value::Null);

        Ok(())
    }

    #[tokio::test]
    async fn profile_status_is_classified() {
        let mut api = MockMusoApi::new();

        api.expect_profile()
            .once()
            .return_once(|_| Err(MusoApiError::Status(429)));

        api.expect_chart()
            .once()
            .return_once(|_| Err(MusoApiError::Status(429)));

        let result = ProxyMusoService::new(Arc::new(api), None)
            .overview(Some("artist-1".to_string()))
            .await;

        assert!(matches!(result, Err(MusoServiceError::RateLimited)));
    }
}
