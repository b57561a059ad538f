//! App Router

use salvo::Router;

use crate::{auth, customers, muso, plans, promotions, webhooks};

pub fn app_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("active-promotion").get(promotions::active::handler))
        .push(Router::with_path("muso").get(muso::get::handler))
        .push(
            Router::with_path("create-stripe-customer")
                .hoop(auth::middleware::identify)
                .post(customers::create::handler),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("current-user-plan").get(plans::current::handler))
                .push(Router::with_path("test-webhook").post(webhooks::send_test::handler)),
        )
}

#[cfg(test)]
mod tests {
    use mixdesk_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::promotions::{
            EMPTY_PROMOTION_BODY, MockPromotionsService,
            records::{PayloadOrigin, PromotionPayload},
        },
    };
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{StrictMocks, state_from};

    use super::*;

    fn make_service(mocks: StrictMocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_from(mocks)))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_protected_routes_require_bearer_token() -> TestResult {
        let plan = TestClient::get("http://example.com/api/current-user-plan")
            .send(&make_service(StrictMocks::default()))
            .await;

        let webhook = TestClient::post("http://example.com/api/test-webhook")
            .json(&serde_json::json!({}))
            .send(&make_service(StrictMocks::default()))
            .await;

        assert_eq!(plan.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(webhook.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_active_promotion_is_public() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions.expect_active_promotion().once().return_once(|| PromotionPayload {
            body: EMPTY_PROMOTION_BODY.to_string(),
            origin: PayloadOrigin::Upstream,
        });

        promotions.expect_invalidate().never();

        let mut res = TestClient::get("http://example.com/api/active-promotion")
            .send(&make_service(StrictMocks {
                promotions,
                ..StrictMocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, EMPTY_PROMOTION_BODY);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_stripe_customer_rejects_invalid_tokens() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::Unauthorized));

        let res = TestClient::post("http://example.com/api/create-stripe-customer")
            .add_header(AUTHORIZATION, "Bearer forged", true)
            .json(&serde_json::json!({
                "email": "artist@example.com",
                "uuid": "00000000-0000-0000-0000-000000000000",
            }))
            .send(&make_service(StrictMocks {
                auth,
                ..StrictMocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
