//! Muso Records

use serde::Serialize;
use serde_json::Value;

/// Profile and chart data for a Muso.ai profile, passed through as returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusoOverview {
    pub profile: Value,

    /// `null` when the chart could not be fetched.
    pub chart: Value,
}
