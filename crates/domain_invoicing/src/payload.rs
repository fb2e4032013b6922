//! Invoice payloads as sent by the editing surface
//!
//! A payload carries the rows plus the discount, either nested
//! (`"discount": {"enabled": true, "type": "percentage", "value": 10}`) or in
//! the flat form the invoice store uses (`discountEnabled`, `discountType`,
//! `discountValue`). The nested form wins when both are present.

use serde_json::Value;

use crate::coerce::{self, CoercionPolicy};
use crate::discount::{DiscountConfig, RawDiscount};
use crate::line::{LineItem, RawLineItem};

const LINE_KEYS: &[&str] = &["lines", "items", "positions"];

/// An invoice payload before coercion
///
/// Each top-level field is read independently; an unusable field falls back
/// to its own default and leaves the others intact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoicePayload {
    pub number: Option<Value>,
    pub lines: Option<Value>,
    pub discount: Option<Value>,
    pub discount_enabled: Option<Value>,
    pub discount_type: Option<Value>,
    pub discount_value: Option<Value>,
}

impl InvoicePayload {
    /// Reads a payload from any JSON value; never fails
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            tracing::debug!("invoice payload is not an object, treating as empty");
            return Self::default();
        };
        Self {
            number: coerce::field(map, &["number"]).cloned(),
            // the first spelling that actually holds rows
            lines: LINE_KEYS
                .iter()
                .filter_map(|key| map.get(*key))
                .find(|rows| rows.is_array())
                .or_else(|| coerce::field(map, LINE_KEYS))
                .cloned(),
            discount: coerce::field(map, &["discount"]).cloned(),
            discount_enabled: coerce::field(map, &["discountEnabled", "discount_enabled"]).cloned(),
            discount_type: coerce::field(map, &["discountType", "discount_type"]).cloned(),
            discount_value: coerce::field(map, &["discountValue", "discount_value"]).cloned(),
        }
    }

    /// Raw rows; anything other than an array yields no rows
    pub fn raw_lines(&self) -> Vec<RawLineItem> {
        match &self.lines {
            Some(Value::Array(rows)) => rows.iter().map(RawLineItem::from_value).collect(),
            _ => Vec::new(),
        }
    }

    /// The discount in its nested or flat form
    ///
    /// A nested discount that is not an object is ignored and the flat
    /// fields are consulted instead.
    pub fn raw_discount(&self) -> Option<RawDiscount> {
        if let Some(nested) = self.discount.as_ref().and_then(RawDiscount::from_value) {
            return Some(nested);
        }
        if self.discount_type.is_none() && self.discount_value.is_none() {
            return None;
        }
        Some(RawDiscount {
            enabled: self.discount_enabled.clone(),
            discount_type: self.discount_type.clone(),
            value: self.discount_value.clone(),
        })
    }

    /// Invoice number as text, if present
    pub fn number(&self) -> Option<String> {
        match &self.number {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Coerces rows and discount into engine input
    pub fn coerce(&self, policy: &CoercionPolicy) -> (Vec<LineItem>, Option<DiscountConfig>) {
        let lines = self
            .raw_lines()
            .iter()
            .map(|raw| raw.coerce(policy))
            .collect();
        let discount = self.raw_discount().and_then(|raw| raw.coerce(policy));
        (lines, discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_flat_discount_fields() {
        let payload = InvoicePayload::from_value(&json!({
            "number": "INV-2026-0007",
            "lines": [{"quantity": 1, "unitPrice": 100, "taxRate": 19}],
            "discountEnabled": true,
            "discountType": "percentage",
            "discountValue": "5"
        }));

        let (lines, discount) = payload.coerce(&CoercionPolicy::default());
        assert_eq!(payload.number().as_deref(), Some("INV-2026-0007"));
        assert_eq!(lines.len(), 1);
        assert_eq!(discount, Some(DiscountConfig::percentage(dec!(5))));
    }

    #[test]
    fn test_nested_discount_wins() {
        let payload = InvoicePayload::from_value(&json!({
            "lines": [],
            "discount": {"enabled": true, "type": "fixed", "value": 20},
            "discountType": "percentage",
            "discountValue": 50
        }));

        let (_, discount) = payload.coerce(&CoercionPolicy::default());
        assert_eq!(discount, Some(DiscountConfig::fixed(dec!(20))));
    }

    #[test]
    fn test_non_object_discount_keeps_lines() {
        for discount in [json!(false), json!(""), json!(3)] {
            let payload = InvoicePayload::from_value(&json!({
                "lines": [{"quantity": 2, "unitPrice": 100, "taxRate": 19}],
                "discount": discount
            }));

            let (lines, coerced) = payload.coerce(&CoercionPolicy::default());
            assert_eq!(lines.len(), 1, "discount {discount}");
            assert_eq!(coerced, None);
        }
    }

    #[test]
    fn test_unusable_nested_discount_falls_back_to_flat_fields() {
        let payload = InvoicePayload::from_value(&json!({
            "discount": "",
            "discountEnabled": "yes",
            "discountType": "fixed",
            "discountValue": 15
        }));

        let (_, discount) = payload.coerce(&CoercionPolicy::default());
        assert_eq!(discount, Some(DiscountConfig::fixed(dec!(15))));
    }

    #[test]
    fn test_first_row_list_wins() {
        let payload = InvoicePayload::from_value(&json!({
            "lines": [{"quantity": 1, "unitPrice": 10}],
            "items": [{"quantity": 5, "unitPrice": 10}, {"quantity": 1, "unitPrice": 1}]
        }));
        let lines = payload.raw_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, Some(json!(1)));

        let payload = InvoicePayload::from_value(&json!({
            "lines": "none",
            "positions": [{"quantity": 3, "unitPrice": 10}]
        }));
        assert_eq!(payload.raw_lines().len(), 1);
    }

    #[test]
    fn test_garbage_payload_is_empty() {
        let payload = InvoicePayload::from_value(&json!({"lines": "nope", "discount": 3}));
        let (lines, discount) = payload.coerce(&CoercionPolicy::default());
        assert!(lines.is_empty());
        assert_eq!(discount, None);

        let payload = InvoicePayload::from_value(&json!([1, 2, 3]));
        assert!(payload.raw_lines().is_empty());
    }
}
