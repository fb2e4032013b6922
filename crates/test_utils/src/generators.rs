//! Property-Based Test Generators
//!
//! Provides proptest strategies for rows, rates and discounts within the
//! ranges a real invoice uses.

use core_kernel::TaxRate;
use domain_invoicing::{DiscountConfig, LineItem};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Common VAT rates
pub fn tax_rate_strategy() -> impl Strategy<Value = TaxRate> {
    prop_oneof![
        Just(TaxRate::from_percentage(dec!(19))),
        Just(TaxRate::from_percentage(dec!(7))),
        Just(TaxRate::from_percentage(dec!(0))),
        Just(TaxRate::from_percentage(dec!(20))),
        Just(TaxRate::from_percentage(dec!(8.1))),
        Just(TaxRate::from_percentage(dec!(5.5))),
    ]
}

/// Quantities from 0 to 1000 with up to three decimals
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 3))
}

/// Unit prices from 0.00 to 100,000.00
pub fn unit_price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Percentages from 0.00 to 100.00
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// A row with non-negative quantity and price
pub fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    (quantity_strategy(), unit_price_strategy(), tax_rate_strategy())
        .prop_map(|(quantity, unit_price, rate)| LineItem::new(quantity, unit_price, rate))
}

/// Up to 20 rows
pub fn lines_strategy() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(line_item_strategy(), 0..20)
}

/// Up to 20 rows sharing one rate
pub fn single_rate_lines_strategy() -> impl Strategy<Value = (TaxRate, Vec<LineItem>)> {
    (
        tax_rate_strategy(),
        prop::collection::vec((quantity_strategy(), unit_price_strategy()), 1..20),
    )
        .prop_map(|(rate, rows)| {
            let lines = rows
                .into_iter()
                .map(|(quantity, price)| LineItem::new(quantity, price, rate))
                .collect();
            (rate, lines)
        })
}

/// Enabled or disabled percentage discounts
pub fn percentage_discount_strategy() -> impl Strategy<Value = DiscountConfig> {
    (percentage_strategy(), any::<bool>()).prop_map(|(value, enabled)| {
        let discount = DiscountConfig::percentage(value);
        if enabled {
            discount
        } else {
            discount.disabled()
        }
    })
}
