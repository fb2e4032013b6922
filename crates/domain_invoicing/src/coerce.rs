//! Coercion of loosely typed input into decimals and flags
//!
//! Invoice data arrives from forms and JSON payloads where a quantity may be
//! a number, a string, `null` or missing altogether. These helpers turn such
//! values into typed data and never fail: anything unusable yields `None`
//! and the caller substitutes its default.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use core_kernel::TaxRate;

use crate::config::DEFAULT_MAX_MAGNITUDE;

/// Defaults and bounds applied while coercing raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoercionPolicy {
    /// Rate used when a line has no usable tax rate
    pub default_tax_rate: TaxRate,
    /// Values whose magnitude exceeds this bound are rejected
    pub max_magnitude: Decimal,
}

impl Default for CoercionPolicy {
    fn default() -> Self {
        Self {
            default_tax_rate: TaxRate::default(),
            max_magnitude: DEFAULT_MAX_MAGNITUDE,
        }
    }
}

impl CoercionPolicy {
    /// Coerces a value to a decimal, `None` when it is missing or unusable
    pub fn decimal(&self, value: Option<&Value>) -> Option<Decimal> {
        let parsed = match value? {
            Value::Number(n) => parse_decimal(&n.to_string()),
            Value::String(s) => parse_decimal_text(s),
            _ => None,
        }?;

        if parsed.abs() > self.max_magnitude {
            tracing::debug!(value = %parsed, bound = %self.max_magnitude, "value out of range");
            return None;
        }
        Some(parsed)
    }

    /// Coerces a value to a decimal, falling back to zero
    pub fn decimal_or_zero(&self, value: Option<&Value>) -> Decimal {
        self.decimal(value).unwrap_or(Decimal::ZERO)
    }

    /// Coerces a value to a tax rate, falling back to the default rate
    pub fn tax_rate(&self, value: Option<&Value>) -> TaxRate {
        self.decimal(value)
            .map(TaxRate::from_percentage)
            .unwrap_or(self.default_tax_rate)
    }
}

/// Coerces a value to a flag
///
/// Booleans pass through, numbers are true when non-zero, and the strings
/// `true`, `1`, `yes` and `on` (any case) are true. Everything else is false.
pub fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => parse_decimal(&n.to_string()).is_some_and(|d| !d.is_zero()),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        _ => false,
    }
}

/// Looks up the first of `keys` that is present and not `null`
///
/// Lets a field have several spellings (`unitPrice`, `unit_price`, `price`)
/// without a second spelling invalidating the whole object.
pub fn field<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

/// Returns the trimmed text of a string value, if any
pub fn text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Parses user-entered decimal text
///
/// Accepts a decimal comma (`"12,50"`) when the text has no decimal point.
/// Digit separators such as `_` are rejected.
fn parse_decimal_text(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }
    if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        return parse_decimal(&trimmed.replace(',', "."));
    }
    parse_decimal(trimmed)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
