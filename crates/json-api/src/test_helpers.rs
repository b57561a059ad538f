//! Test helpers.

use std::sync::Arc;

use mixdesk_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        customers::MockCustomersService, muso::MockMusoService, plans::MockPlansService,
        promotions::MockPromotionsService, users::UserUuid, webhooks::MockWebhooksService,
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks that fail the test on any call not explicitly expected.
pub(crate) struct StrictMocks {
    pub(crate) plans: MockPlansService,
    pub(crate) promotions: MockPromotionsService,
    pub(crate) customers: MockCustomersService,
    pub(crate) muso: MockMusoService,
    pub(crate) webhooks: MockWebhooksService,
    pub(crate) auth: MockAuthService,
}

impl Default for StrictMocks {
    fn default() -> Self {
        let mut plans = MockPlansService::new();
        plans.expect_get_user_plan_info().never();

        let mut promotions = MockPromotionsService::new();
        promotions.expect_active_promotion().never();
        promotions.expect_invalidate().never();

        let mut customers = MockCustomersService::new();
        customers.expect_create_customer().never();

        let mut muso = MockMusoService::new();
        muso.expect_overview().never();

        let mut webhooks = MockWebhooksService::new();
        webhooks.expect_send_test().never();

        let mut auth = MockAuthService::new();
        auth.expect_authenticate_bearer().never();

        Self {
            plans,
            promotions,
            customers,
            muso,
            webhooks,
            auth,
        }
    }
}

pub(crate) fn state_from(mocks: StrictMocks) -> Arc<State> {
    State::from_app_context(AppContext {
        plans: Arc::new(mocks.plans),
        promotions: Arc::new(mocks.promotions),
        customers: Arc::new(mocks.customers),
        muso: Arc::new(mocks.muso),
        webhooks: Arc::new(mocks.webhooks),
        auth: Arc::new(mocks.auth),
    })
}

/// Serve `route` without an authenticated user.
pub(crate) fn public_service(mocks: StrictMocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_from(mocks)))
            .push(route),
    )
}

/// Serve `route` as if the auth middleware resolved [`TEST_USER_UUID`].
pub(crate) fn user_service(mocks: StrictMocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_from(mocks)))
            .hoop(inject_user)
            .push(route),
    )
}
