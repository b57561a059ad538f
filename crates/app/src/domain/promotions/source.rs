//! Upstream promotion source.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;

use crate::domain::promotions::{
    errors::PromotionSourceError, parse::parse_promotion, records::Promotion,
};

/// Path of the active promotion resource on the marketing service.
pub const ACTIVE_PROMOTION_PATH: &str = "/api/promotions/active";

/// Upstream fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[automock]
#[async_trait]
pub trait PromotionSource: Send + Sync {
    /// Fetch the currently running promotion, `None` when there is none.
    async fn fetch_active(&self) -> Result<Option<Promotion>, PromotionSourceError>;
}

/// Fetches promotions from the marketing service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPromotionSource {
    url: String,
    http: Client,
}

impl HttpPromotionSource {
    /// Create a source for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: format!("{}{ACTIVE_PROMOTION_PATH}", base_url.trim_end_matches('/')),
            http,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PromotionSource for HttpPromotionSource {
    async fn fetch_active(&self) -> Result<Option<Promotion>, PromotionSourceError> {
        let response = self.http.get(&self.url).send().await.map_err(classify)?;

        let status = response.status();

        if !status.is_success() {
            return Err(PromotionSourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(classify)?;

        Ok(parse_promotion(&body))
    }
}

fn classify(error: reqwest::Error) -> PromotionSourceError {
    if error.is_timeout() {
        PromotionSourceError::Timeout
    } else {
        PromotionSourceError::Http(error)
    }
}

#[cfg(test)]
mod tests {
    use salvo::prelude::*;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test::http::StubServer;

    use super::*;

    #[handler]
    async fn active(res: &mut Response) {
        res.render(Json(json!({
            "promotion": {
                "name": "Spring Sale",
                "code": "SPRING20",
                "discountAmount": 20,
                "discountType": "percentage",
                "appliesToMonthly": true,
                "appliesToYearly": false,
                "active": true
            }
        })));
    }

    #[handler]
    async fn server_error(res: &mut Response) {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        res.render(Text::Plain("upstream exploded"));
    }

    #[handler]
    async fn slow(res: &mut Response) {
        tokio::time::sleep(Duration::from_millis(500)).await;
        res.render(Json(json!({ "promotion": null })));
    }

    #[handler]
    async fn garbage(res: &mut Response) {
        res.render(Text::Html("<html>maintenance</html>"));
    }

    async fn source_for(handler: impl Handler) -> Result<(StubServer, HttpPromotionSource), reqwest::Error> {
        let server =
            StubServer::start(Router::with_path("api/promotions/active").get(handler)).await;

        let source = HttpPromotionSource::new(&server.url(), Duration::from_millis(200))?;

        Ok((server, source))
    }

    #[test]
    fn builds_url_from_base() -> TestResult {
        let source = HttpPromotionSource::new("https://marketing.example.com/", DEFAULT_FETCH_TIMEOUT)?;

        assert_eq!(
            source.url(),
            "https://marketing.example.com/api/promotions/active"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_error() -> TestResult {
        let source = HttpPromotionSource::new("http://127.0.0.1:9", Duration::from_millis(200))?;

        assert!(source.fetch_active().await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn active_promotion_is_parsed() -> TestResult {
        let (_server, source) = source_for(active).await?;

        let promotion = source.fetch_active().await?.ok_or("expected a promotion")?;

        assert_eq!(promotion.code, "SPRING20");
        assert!(promotion.applies_to_monthly);
        assert!(!promotion.applies_to_yearly);

        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_is_reported() -> TestResult {
        let (_server, source) = source_for(server_error).await?;

        let result = source.fetch_active().await;

        assert!(
            matches!(result, Err(PromotionSourceError::Status(500))),
            "{result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn slow_upstream_times_out() -> TestResult {
        let (_server, source) = source_for(slow).await?;

        let result = source.fetch_active().await;

        assert!(
            matches!(result, Err(PromotionSourceError::Timeout)),
            "{result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_success_body_means_no_promotion() -> TestResult {
        let (_server, source) = source_for(garbage).await?;

        assert_eq!(source.fetch_active().await?, None);

        Ok(())
    }
}
