//! Plans Config

use clap::Args;
use mixdesk_app::domain::plans::tiers::{PriceTierParseError, PriceTierTable, parse_price_tiers};

/// Plan resolution settings.
#[derive(Debug, Args)]
pub struct PlansConfig {
    /// Extra price mappings checked before the built-in ones, e.g. `price_123=pro,price_456=starter`
    #[arg(long, env = "PRICE_TIERS", default_value = "")]
    pub price_tiers: String,
}

impl PlansConfig {
    pub(crate) fn price_tier_table(&self) -> Result<PriceTierTable, PriceTierParseError> {
        Ok(PriceTierTable::with_overrides(parse_price_tiers(
            &self.price_tiers,
        )?))
    }
}
