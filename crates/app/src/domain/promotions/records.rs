//! Promotion Records

use serde::{Deserialize, Serialize};

/// How a promotion's discount amount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// A time-boxed discount code advertised by the marketing service.
///
/// Dates and amounts are passed through as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub name: String,
    pub code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,

    #[serde(default)]
    pub applies_to_monthly: bool,

    #[serde(default)]
    pub applies_to_yearly: bool,

    pub active: bool,
}

/// Body returned by the active promotion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePromotion {
    pub promotion: Option<Promotion>,
}

impl ActivePromotion {
    #[must_use]
    pub const fn none() -> Self {
        Self { promotion: None }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.promotion.is_some()
    }
}

/// Where a served payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOrigin {
    /// Served verbatim from the cache.
    Cache,

    /// Fetched from the upstream service and written back to the cache.
    Upstream,

    /// Upstream was unavailable; the empty payload was served.
    Fallback,
}

impl PayloadOrigin {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Upstream => "upstream",
            Self::Fallback => "fallback",
        }
    }
}

/// Serialized promotion JSON ready to be written to a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionPayload {
    pub body: String,
    pub origin: PayloadOrigin,
}
