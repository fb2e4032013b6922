//! Engine configuration
//!
//! Settings that vary per jurisdiction or presentation. Loading from the
//! environment happens in the binary; this type only describes the values
//! and their defaults.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use core_kernel::{Currency, RoundingPolicy, TaxRate};

use crate::coerce::CoercionPolicy;
use crate::format::Locale;
use crate::totals::TotalsEngine;

/// Largest magnitude accepted from loosely typed input
pub const DEFAULT_MAX_MAGNITUDE: Decimal = dec!(1000000000000);

/// Configuration for the totals engine and the input boundary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rate applied when a line carries no usable tax rate
    pub default_tax_rate: Decimal,
    /// Midpoint handling for presented amounts
    pub rounding: RoundingPolicy,
    /// Currency of computed totals
    pub currency: Currency,
    /// Inputs above this magnitude are treated as invalid
    pub max_magnitude: Decimal,
    /// Locale used for formatted output
    pub locale: Locale,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_tax_rate: TaxRate::STANDARD_DE.percentage(),
            rounding: RoundingPolicy::HalfUp,
            currency: Currency::EUR,
            max_magnitude: DEFAULT_MAX_MAGNITUDE,
            locale: Locale::De,
        }
    }
}

impl EngineConfig {
    /// Builds the totals engine for this configuration
    pub fn engine(&self) -> TotalsEngine {
        TotalsEngine::new(self.rounding, self.currency)
    }

    /// Builds the coercion policy for this configuration
    pub fn coercion(&self) -> CoercionPolicy {
        CoercionPolicy {
            default_tax_rate: TaxRate::from_percentage(self.default_tax_rate),
            max_magnitude: self.max_magnitude.abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_tax_rate, dec!(19));
        assert_eq!(config.rounding, RoundingPolicy::HalfUp);
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.locale, Locale::De);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"default_tax_rate": "20", "rounding": "half_even"}"#).unwrap();
        assert_eq!(config.default_tax_rate, dec!(20));
        assert_eq!(config.rounding, RoundingPolicy::HalfEven);
        assert_eq!(config.max_magnitude, DEFAULT_MAX_MAGNITUDE);
    }

    #[test]
    fn test_coercion_policy_uses_configured_rate() {
        let config = EngineConfig {
            default_tax_rate: dec!(8.1),
            ..EngineConfig::default()
        };
        assert_eq!(config.coercion().default_tax_rate.key(), "8.1");
    }
}
