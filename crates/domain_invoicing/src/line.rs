//! Invoice line positions
//!
//! [`LineItem`] is the typed row the totals engine works on. [`RawLineItem`]
//! is what arrives from forms and JSON before coercion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::TaxRate;

use crate::coerce::{self, CoercionPolicy};

/// A single invoice row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free text shown on the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of units
    pub quantity: Decimal,
    /// Net price per unit
    pub unit_price: Decimal,
    /// VAT rate for this row
    pub tax_rate: TaxRate,
}

impl LineItem {
    /// Creates a new line item
    pub fn new(quantity: Decimal, unit_price: Decimal, tax_rate: TaxRate) -> Self {
        Self {
            description: None,
            quantity,
            unit_price,
            tax_rate,
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Quantity times unit price, unrounded
    ///
    /// Saturates instead of overflowing; coerced input stays far below the
    /// point where that matters.
    pub fn net(&self) -> Decimal {
        self.quantity.saturating_mul(self.unit_price)
    }
}

/// An invoice row as received, before coercion
///
/// Every field is kept as an arbitrary JSON value. Both `camelCase` and
/// `snake_case` keys are accepted. When a row carries several spellings of
/// one field, the first non-null one in the matching `*_KEYS` list wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLineItem {
    pub description: Option<Value>,
    pub quantity: Option<Value>,
    pub unit_price: Option<Value>,
    pub tax_rate: Option<Value>,
}

impl RawLineItem {
    pub const DESCRIPTION_KEYS: &'static [&'static str] = &["description"];
    pub const QUANTITY_KEYS: &'static [&'static str] = &["quantity", "qty"];
    pub const UNIT_PRICE_KEYS: &'static [&'static str] = &["unitPrice", "unit_price", "price"];
    pub const TAX_RATE_KEYS: &'static [&'static str] =
        &["taxRate", "tax_rate", "vatRate", "vat_rate"];

    /// Converts into a typed line; never fails
    ///
    /// Missing or unusable quantity and price become 0, a missing or unusable
    /// tax rate becomes the policy's default rate.
    pub fn coerce(&self, policy: &CoercionPolicy) -> LineItem {
        LineItem {
            description: coerce::text(self.description.as_ref()),
            quantity: policy.decimal_or_zero(self.quantity.as_ref()),
            unit_price: policy.decimal_or_zero(self.unit_price.as_ref()),
            tax_rate: policy.tax_rate(self.tax_rate.as_ref()),
        }
    }

    /// Reads a row from any JSON value; non-objects yield an empty row
    ///
    /// Each field is looked up on its own, so an unusable field never
    /// affects its neighbours.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            tracing::debug!("line item is not an object, treating as empty");
            return Self::default();
        };
        Self {
            description: coerce::field(map, Self::DESCRIPTION_KEYS).cloned(),
            quantity: coerce::field(map, Self::QUANTITY_KEYS).cloned(),
            unit_price: coerce::field(map, Self::UNIT_PRICE_KEYS).cloned(),
            tax_rate: coerce::field(map, Self::TAX_RATE_KEYS).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_net_is_quantity_times_price() {
        let line = LineItem::new(dec!(2), dec!(100), TaxRate::default());
        assert_eq!(line.net(), dec!(200));
    }

    #[test]
    fn test_coerce_camel_case() {
        let raw = RawLineItem::from_value(&json!({
            "description": "Consulting",
            "quantity": "2",
            "unitPrice": 100,
            "taxRate": 7
        }));

        let line = raw.coerce(&CoercionPolicy::default());
        assert_eq!(line.description.as_deref(), Some("Consulting"));
        assert_eq!(line.quantity, dec!(2));
        assert_eq!(line.unit_price, dec!(100));
        assert_eq!(line.tax_rate.key(), "7");
    }

    #[test]
    fn test_coerce_snake_case_aliases() {
        let raw = RawLineItem::from_value(&json!({
            "quantity": 1,
            "unit_price": "9,99",
            "tax_rate": "19"
        }));

        let line = raw.coerce(&CoercionPolicy::default());
        assert_eq!(line.unit_price, dec!(9.99));
        assert_eq!(line.tax_rate.key(), "19");
    }

    #[test]
    fn test_malformed_row_degrades_to_defaults() {
        let raw = RawLineItem::from_value(&json!({"unitPrice": "abc"}));

        let line = raw.coerce(&CoercionPolicy::default());
        assert_eq!(line.quantity, Decimal::ZERO);
        assert_eq!(line.unit_price, Decimal::ZERO);
        assert_eq!(line.tax_rate, TaxRate::default());
        assert_eq!(line.description, None);
    }

    #[test]
    fn test_duplicate_spellings_keep_the_row() {
        let raw = RawLineItem::from_value(&json!({
            "quantity": 2,
            "qty": 3,
            "unitPrice": 100,
            "price": "x",
            "vat_rate": 7
        }));

        let line = raw.coerce(&CoercionPolicy::default());
        assert_eq!(line.quantity, dec!(2));
        assert_eq!(line.unit_price, dec!(100));
        assert_eq!(line.tax_rate.key(), "7");
    }

    #[test]
    fn test_from_value_on_non_object() {
        assert_eq!(RawLineItem::from_value(&json!("row")), RawLineItem::default());
        assert_eq!(RawLineItem::from_value(&json!(null)), RawLineItem::default());
    }
}
