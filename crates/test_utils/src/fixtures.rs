//! Pre-built Test Fixtures
//!
//! Ready-to-use rows, discounts and payloads. The two-row invoice
//! (2 x 100.00 at 19 %, 1 x 50.00 at 7 %) is the reference scenario used
//! throughout the suite.

use chrono::NaiveDate;
use core_kernel::TaxRate;
use domain_invoicing::{DiscountConfig, LineItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

/// Fixture for line items
pub struct LineFixtures;

impl LineFixtures {
    /// 2 x 100.00 at 19 %
    pub fn consulting() -> LineItem {
        LineItem::new(dec!(2), dec!(100), TaxRate::from_percentage(dec!(19)))
            .with_description("Consulting")
    }

    /// 1 x 50.00 at 7 %
    pub fn books() -> LineItem {
        LineItem::new(dec!(1), dec!(50), TaxRate::from_percentage(dec!(7)))
            .with_description("Books")
    }

    /// The reference two-row invoice
    pub fn two_rates() -> Vec<LineItem> {
        vec![Self::consulting(), Self::books()]
    }

    /// A single row at the given values
    pub fn single(quantity: Decimal, unit_price: Decimal, rate: Decimal) -> Vec<LineItem> {
        vec![LineItem::new(quantity, unit_price, TaxRate::from_percentage(rate))]
    }
}

/// Fixture for discounts
pub struct DiscountFixtures;

impl DiscountFixtures {
    pub fn ten_percent() -> DiscountConfig {
        DiscountConfig::percentage(dec!(10))
    }

    pub fn full() -> DiscountConfig {
        DiscountConfig::percentage(dec!(100))
    }

    pub fn fixed(amount: Decimal) -> DiscountConfig {
        DiscountConfig::fixed(amount)
    }
}

/// Fixture for raw JSON payloads as the editing surface sends them
pub struct PayloadFixtures;

impl PayloadFixtures {
    /// The reference invoice with a flat 10 % discount
    pub fn two_rates_with_discount() -> Value {
        json!({
            "number": "INV-2026-0001",
            "lines": [
                {"description": "Consulting", "quantity": 2, "unitPrice": "100.00", "taxRate": 19},
                {"description": "Books", "quantity": "1", "unitPrice": 50, "taxRate": "7"}
            ],
            "discountEnabled": true,
            "discountType": "percentage",
            "discountValue": 10
        })
    }

    /// A row with every numeric field broken or missing
    pub fn malformed_row() -> Value {
        json!({"description": "???", "unitPrice": "abc"})
    }
}

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    pub fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 30).unwrap()
    }

    pub fn after_due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()
    }
}
