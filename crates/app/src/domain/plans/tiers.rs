//! Price to tier mapping.

use thiserror::Error;

use crate::domain::plans::records::{PlanTier, UnknownPlanTier};

/// Built-in price mappings for the live catalogue.
pub const DEFAULT_PRICE_TIERS: &[(&str, PlanTier)] = &[
    ("price_starter_monthly", PlanTier::Starter),
    ("price_starter_yearly", PlanTier::Starter),
    ("price_standard_monthly", PlanTier::Standard),
    ("price_standard_yearly", PlanTier::Standard),
    ("price_pro_monthly", PlanTier::Pro),
    ("price_pro_yearly", PlanTier::Pro),
    ("price_enterprise_monthly", PlanTier::Enterprise),
    ("price_enterprise_yearly", PlanTier::Enterprise),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceTierParseError {
    #[error("price mapping must look like `price_id=tier`: {0}")]
    InvalidEntry(String),

    #[error(transparent)]
    UnknownTier(#[from] UnknownPlanTier),
}

/// Ordered price id to tier lookup. The first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTierTable {
    entries: Vec<(String, PlanTier)>,
}

impl Default for PriceTierTable {
    fn default() -> Self {
        Self::with_overrides(Vec::new())
    }
}

impl PriceTierTable {
    /// Build a table where `overrides` are consulted before the built-in mappings.
    #[must_use]
    pub fn with_overrides(overrides: Vec<(String, PlanTier)>) -> Self {
        let mut entries = overrides;

        entries.extend(
            DEFAULT_PRICE_TIERS
                .iter()
                .map(|(price, tier)| ((*price).to_string(), *tier)),
        );

        Self { entries }
    }

    /// Tier for a subscription price. Unknown or missing prices map to [`PlanTier::Free`].
    #[must_use]
    pub fn tier_for(&self, price_id: Option<&str>) -> PlanTier {
        let Some(price_id) = price_id.map(str::trim).filter(|price| !price.is_empty()) else {
            return PlanTier::Free;
        };

        self.entries
            .iter()
            .find(|(price, _)| price == price_id)
            .map_or(PlanTier::Free, |(_, tier)| *tier)
    }
}

/// Parse `price_a=pro,price_b=starter` into ordered mappings.
///
/// # Errors
///
/// Returns an error for entries without `=` or with an unknown tier name.
pub fn parse_price_tiers(raw: &str) -> Result<Vec<(String, PlanTier)>, PriceTierParseError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (price, tier) = entry
                .split_once('=')
                .filter(|(price, _)| !price.trim().is_empty())
                .ok_or_else(|| PriceTierParseError::InvalidEntry(entry.to_string()))?;

            Ok((price.trim().to_string(), tier.parse::<PlanTier>()?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn unmapped_and_missing_prices_are_free() {
        let table = PriceTierTable::default();

        assert_eq!(table.tier_for(None), PlanTier::Free);
        assert_eq!(table.tier_for(Some("")), PlanTier::Free);
        assert_eq!(table.tier_for(Some("price_unknown")), PlanTier::Free);
    }

    #[test]
    fn built_in_prices_resolve() {
        let table = PriceTierTable::default();

        for (price, tier) in DEFAULT_PRICE_TIERS {
            assert_eq!(table.tier_for(Some(price)), *tier);
        }
    }

    #[test]
    fn first_match_wins() {
        let table = PriceTierTable::with_overrides(vec![
            ("price_pro_monthly".to_string(), PlanTier::Enterprise),
            ("price_pro_monthly".to_string(), PlanTier::Starter),
        ]);

        assert_eq!(table.tier_for(Some("price_pro_monthly")), PlanTier::Enterprise);
    }

    #[test]
    fn parses_override_list() -> TestResult {
        let parsed = parse_price_tiers(" price_a=pro, price_b = Starter ,")?;

        assert_eq!(
            parsed,
            vec![
                ("price_a".to_string(), PlanTier::Pro),
                ("price_b".to_string(), PlanTier::Starter),
            ]
        );

        Ok(())
    }

    #[test]
    fn rejects_malformed_override_entries() {
        assert!(matches!(
            parse_price_tiers("price_a"),
            Err(PriceTierParseError::InvalidEntry(_))
        ));
        assert!(matches!(
            parse_price_tiers("=pro"),
            Err(PriceTierParseError::InvalidEntry(_))
        ));
        assert!(matches!(
            parse_price_tiers("price_a=gold"),
            Err(PriceTierParseError::UnknownTier(_))
        ));
    }
}
