//! Plan Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Subscription tier, ordered from least to most capable.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Starter,
    Standard,
    Pro,
    Enterprise,
}

impl PlanTier {
    pub const ALL: [PlanTier; 5] = [
        PlanTier::Free,
        PlanTier::Starter,
        PlanTier::Standard,
        PlanTier::Pro,
        PlanTier::Enterprise,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Standard => "standard",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }

    /// Usage limits granted by this tier.
    #[must_use]
    pub const fn limits(self) -> PlanLimits {
        match self {
            Self::Free => PlanLimits::new(3, 1, 1),
            Self::Starter => PlanLimits::new(25, 3, 3),
            Self::Standard => PlanLimits::new(100, 10, 10),
            Self::Pro => PlanLimits::new(500, 50, 50),
            Self::Enterprise => PlanLimits::new(10_000, 1_000, 1_000),
        }
    }
}

impl Display for PlanTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown plan tier: {0}")]
pub struct UnknownPlanTier(pub String);

impl FromStr for PlanTier {
    type Err = UnknownPlanTier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownPlanTier(value.to_string()))
    }
}

/// Per-tier usage ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub songs: u64,
    pub players: u64,
    pub landing_pages: u64,
}

impl PlanLimits {
    #[must_use]
    pub const fn new(songs: u64, players: u64, landing_pages: u64) -> Self {
        Self {
            songs,
            players,
            landing_pages,
        }
    }
}

/// Current usage counts for a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanUsage {
    pub songs: u64,
    pub players: u64,
    pub landing_pages: u64,
}

impl PlanUsage {
    /// Compare usage against `limits`. Reaching a limit is not exceeding it.
    #[must_use]
    pub const fn over_limit(&self, limits: &PlanLimits) -> OverLimit {
        OverLimit {
            songs: self.songs > limits.songs,
            players: self.players > limits.players,
            landing_pages: self.landing_pages > limits.landing_pages,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverLimit {
    pub songs: bool,
    pub players: bool,
    pub landing_pages: bool,
}

impl OverLimit {
    #[must_use]
    pub const fn any(&self) -> bool {
        self.songs || self.players || self.landing_pages
    }
}

/// Resolved plan, limits and usage for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPlanInfo {
    pub plan: PlanTier,
    pub limits: PlanLimits,
    pub usage: PlanUsage,
    pub is_over_limit: OverLimit,
    pub has_affiliate_code: bool,
}

impl UserPlanInfo {
    #[must_use]
    pub const fn new(plan: PlanTier, usage: PlanUsage, has_affiliate_code: bool) -> Self {
        let limits = plan.limits();

        Self {
            plan,
            limits,
            is_over_limit: usage.over_limit(&limits),
            usage,
            has_affiliate_code,
        }
    }

    /// Lowest tier with no usage, returned whenever resolution fails.
    #[must_use]
    pub const fn fallback() -> Self {
        Self::new(PlanTier::Free, PlanUsage::new(0, 0, 0), false)
    }
}

impl PlanUsage {
    #[must_use]
    pub const fn new(songs: u64, players: u64, landing_pages: u64) -> Self {
        Self {
            songs,
            players,
            landing_pages,
        }
    }
}
