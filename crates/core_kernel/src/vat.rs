//! VAT rates

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A VAT rate expressed as a percentage (19 means 19 %)
///
/// Rates are normalized on construction so `19`, `19.0` and `19.00` are the
/// same rate and render the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// German standard rate
    pub const STANDARD_DE: TaxRate = TaxRate(dec!(19));

    /// Creates a rate from a percentage (7 for 7 %)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self(percentage.normalize())
    }

    pub fn percentage(&self) -> Decimal {
        self.0
    }

    /// The rate as a fraction (0.19 for 19 %)
    pub fn as_fraction(&self) -> Decimal {
        self.0 / dec!(100)
    }

    /// Tax owed on a net amount, unrounded
    pub fn apply(&self, net: Decimal) -> Decimal {
        net.saturating_mul(self.0) / dec!(100)
    }

    /// Key for per-rate breakdowns: the plain numeric form ("19", "7.5")
    pub fn key(&self) -> String {
        self.0.to_string()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Decimal> for TaxRate {
    fn from(percentage: Decimal) -> Self {
        Self::from_percentage(percentage)
    }
}

impl From<TaxRate> for Decimal {
    fn from(rate: TaxRate) -> Self {
        rate.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::STANDARD_DE
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_normalized() {
        assert_eq!(TaxRate::from_percentage(dec!(19.00)).key(), "19");
        assert_eq!(TaxRate::from_percentage(dec!(7.50)).key(), "7.5");
        assert_eq!(
            TaxRate::from_percentage(dec!(19)),
            TaxRate::from_percentage(dec!(19.0))
        );
    }

    #[test]
    fn test_apply() {
        assert_eq!(TaxRate::from_percentage(dec!(7)).apply(dec!(50)), dec!(3.5));
    }

    #[test]
    fn test_apply_saturates() {
        let rate = TaxRate::from_percentage(dec!(19));
        assert!(rate.apply(Decimal::MAX) > Decimal::ZERO);
    }
}
