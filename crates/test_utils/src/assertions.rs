//! Custom Test Assertions
//!
//! Assertion helpers for totals that give more meaningful failure messages
//! than bare `assert_eq!`.

use domain_invoicing::TotalsResult;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Asserts that gross equals net after discount plus VAT, and that VAT per
/// rate adds up to the total, each within one cent of rounding
///
/// # Panics
///
/// Panics if either identity is off by more than 0.01
pub fn assert_totals_consistent(totals: &TotalsResult) {
    let gross_diff = (totals.net_after_discount + totals.total_vat - totals.gross_total).abs();
    assert!(
        gross_diff <= dec!(0.01),
        "gross {} != net after discount {} + VAT {} (diff {})",
        totals.gross_total,
        totals.net_after_discount,
        totals.total_vat,
        gross_diff
    );

    let vat_sum: Decimal = totals.vat_amounts.iter().map(|entry| entry.amount).sum();
    let tolerance = dec!(0.01) * Decimal::from(totals.vat_amounts.len().max(1) as u64);
    let vat_diff = (vat_sum - totals.total_vat).abs();
    assert!(
        vat_diff <= tolerance,
        "VAT per rate sums to {} but total VAT is {} (diff {})",
        vat_sum,
        totals.total_vat,
        vat_diff
    );
}

/// Asserts that every amount in the result is zero and no VAT rates exist
pub fn assert_totals_zero(totals: &TotalsResult) {
    for (name, value) in [
        ("net_total", totals.net_total),
        ("discount_amount", totals.discount_amount),
        ("net_after_discount", totals.net_after_discount),
        ("total_vat", totals.total_vat),
        ("gross_total", totals.gross_total),
    ] {
        assert!(value.is_zero(), "expected {name} to be zero, got {value}");
    }
    assert!(
        totals.vat_amounts.is_empty(),
        "expected no VAT rates, got {:?}",
        totals.vat_amounts.keys()
    );
}

/// Asserts the VAT breakdown has exactly these keys and amounts, in order
pub fn assert_vat_breakdown(totals: &TotalsResult, expected: &[(&str, Decimal)]) {
    let actual: Vec<(String, Decimal)> = totals
        .vat_amounts
        .iter()
        .map(|entry| (entry.rate.key(), entry.amount))
        .collect();
    let expected: Vec<(String, Decimal)> = expected
        .iter()
        .map(|(key, amount)| (key.to_string(), *amount))
        .collect();
    assert_eq!(actual, expected, "VAT breakdown mismatch");
}

/// Asserts all amounts carry exactly `dp` decimal places
pub fn assert_scale(totals: &TotalsResult, dp: u32) {
    let amounts = [
        totals.net_total,
        totals.discount_amount,
        totals.net_after_discount,
        totals.total_vat,
        totals.gross_total,
    ];
    for value in amounts
        .into_iter()
        .chain(totals.vat_amounts.iter().map(|entry| entry.amount))
    {
        assert_eq!(value.scale(), dp, "{value} does not have {dp} decimal places");
    }
}
