//! Invoice-level discounts

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::coerce::{self, CoercionPolicy};

/// How a discount value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percentage of the net total
    Percentage,
    /// Absolute currency amount
    Fixed,
}

impl FromStr for DiscountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" | "percent" => Ok(DiscountType::Percentage),
            "fixed" | "amount" => Ok(DiscountType::Fixed),
            other => Err(format!("unknown discount type '{other}'")),
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

/// Discount applied to the whole invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountConfig {
    /// Whether the discount applies at all
    pub enabled: bool,
    /// Interpretation of `value`
    pub discount_type: DiscountType,
    /// Percentage or amount, depending on `discount_type`
    pub value: Decimal,
}

impl DiscountConfig {
    /// An enabled percentage discount (10 means 10 %)
    pub fn percentage(value: Decimal) -> Self {
        Self {
            enabled: true,
            discount_type: DiscountType::Percentage,
            value,
        }
    }

    /// An enabled fixed-amount discount
    pub fn fixed(value: Decimal) -> Self {
        Self {
            enabled: true,
            discount_type: DiscountType::Fixed,
            value,
        }
    }

    /// Returns a copy with the enabled flag cleared
    pub fn disabled(self) -> Self {
        Self {
            enabled: false,
            ..self
        }
    }

    /// Discount amount for a given net total, unrounded
    ///
    /// Fixed amounts are taken literally and may exceed the net total.
    pub fn amount_for(&self, net_total: Decimal) -> Decimal {
        if !self.enabled {
            return Decimal::ZERO;
        }
        match self.discount_type {
            DiscountType::Percentage => net_total.saturating_mul(self.value) / dec!(100),
            DiscountType::Fixed => self.value,
        }
    }
}

/// A discount as received, before coercion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDiscount {
    pub enabled: Option<Value>,
    pub discount_type: Option<Value>,
    pub value: Option<Value>,
}

impl RawDiscount {
    pub const ENABLED_KEYS: &'static [&'static str] =
        &["enabled", "discountEnabled", "discount_enabled"];
    pub const TYPE_KEYS: &'static [&'static str] = &["type", "discountType", "discount_type"];
    pub const VALUE_KEYS: &'static [&'static str] = &["value", "discountValue", "discount_value"];

    /// Reads a discount from any JSON value
    ///
    /// Anything other than an object (`false`, `""`, a bare number) means
    /// no discount.
    pub fn from_value(value: &Value) -> Option<Self> {
        let Value::Object(map) = value else {
            tracing::debug!(%value, "discount is not an object, ignoring it");
            return None;
        };
        Some(Self {
            enabled: coerce::field(map, Self::ENABLED_KEYS).cloned(),
            discount_type: coerce::field(map, Self::TYPE_KEYS).cloned(),
            value: coerce::field(map, Self::VALUE_KEYS).cloned(),
        })
    }

    /// Converts into a typed discount
    ///
    /// Returns `None` when the type is missing or unknown; such a discount
    /// cannot apply. A missing or unusable value becomes 0.
    pub fn coerce(&self, policy: &CoercionPolicy) -> Option<DiscountConfig> {
        let discount_type = match self.discount_type.as_ref() {
            Some(Value::String(s)) => match s.parse::<DiscountType>() {
                Ok(t) => t,
                Err(reason) => {
                    tracing::debug!(%reason, "ignoring discount");
                    return None;
                }
            },
            _ => return None,
        };

        Some(DiscountConfig {
            enabled: coerce::flag(self.enabled.as_ref()),
            discount_type,
            value: policy.decimal_or_zero(self.value.as_ref()),
        })
    }
}
