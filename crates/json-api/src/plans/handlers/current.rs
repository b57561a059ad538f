//! Current User Plan Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use mixdesk_app::domain::plans::records::{
    OverLimit, PlanLimits, PlanUsage, UserPlanInfo,
};

use crate::{extensions::*, state::State};

/// Songs, players and landing pages, as a limit or a usage count.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlanCountsResponse {
    pub songs: u64,
    pub players: u64,
    pub landing_pages: u64,
}

impl From<PlanLimits> for PlanCountsResponse {
    fn from(limits: PlanLimits) -> Self {
        Self {
            songs: limits.songs,
            players: limits.players,
            landing_pages: limits.landing_pages,
        }
    }
}

impl From<PlanUsage> for PlanCountsResponse {
    fn from(usage: PlanUsage) -> Self {
        Self {
            songs: usage.songs,
            players: usage.players,
            landing_pages: usage.landing_pages,
        }
    }
}

/// Which usage counts exceed the plan limits.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OverLimitResponse {
    pub songs: bool,
    pub players: bool,
    pub landing_pages: bool,
}

impl From<OverLimit> for OverLimitResponse {
    fn from(over: OverLimit) -> Self {
        Self {
            songs: over.songs,
            players: over.players,
            landing_pages: over.landing_pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserPlanResponse {
    /// Plan tier: free, starter, standard, pro or enterprise
    pub plan: String,

    pub limits: PlanCountsResponse,
    pub usage: PlanCountsResponse,
    pub is_over_limit: OverLimitResponse,
    pub has_affiliate_code: bool,
}

impl From<UserPlanInfo> for UserPlanResponse {
    fn from(info: UserPlanInfo) -> Self {
        Self {
            plan: info.plan.as_str().to_string(),
            limits: info.limits.into(),
            usage: info.usage.into(),
            is_over_limit: info.is_over_limit.into(),
            has_affiliate_code: info.has_affiliate_code,
        }
    }
}

/// Current User Plan Handler
///
/// Resolves the signed-in user's plan. Lookup failures fall back to the free
/// plan with zero usage rather than an error.
#[endpoint(
    tags("plans"),
    summary = "Current User Plan",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Plan, limits and usage"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserPlanResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let info = state.app.plans.get_user_plan_info(user).await;

    Ok(Json(info.into()))
}
