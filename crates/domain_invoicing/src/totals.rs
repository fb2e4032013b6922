//! Invoice totals engine
//!
//! Computes net total, discount, VAT per rate, total VAT and gross total for
//! a list of line items and an optional invoice-level discount.
//!
//! # Calculation
//!
//! 1. Each line's net is quantity times unit price; the net total is their sum.
//! 2. The discount is a percentage of the net total or a fixed amount.
//! 3. The discount is pro-rated across lines by their share of the net
//!    total, and each line's VAT is taken on its discounted net.
//! 4. VAT is accumulated per distinct rate, in the order rates first appear.
//!
//! All arithmetic is exact decimal. Amounts are rounded to currency precision
//! only when the [`TotalsResult`] is built, so per-line rounding never
//! compounds.
//!
//! The engine is pure: no state, no I/O, and it never fails.

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use core_kernel::{Currency, Money, RoundingPolicy, TaxRate};

use crate::discount::DiscountConfig;
use crate::line::LineItem;

/// Computes totals with the default engine (EUR, half-up rounding)
pub fn compute_totals(lines: &[LineItem], discount: Option<&DiscountConfig>) -> TotalsResult {
    TotalsEngine::default().compute(lines, discount)
}

/// Totals calculator parameterised by rounding policy and currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalsEngine {
    rounding: RoundingPolicy,
    currency: Currency,
}

impl TotalsEngine {
    /// Creates an engine
    pub fn new(rounding: RoundingPolicy, currency: Currency) -> Self {
        Self { rounding, currency }
    }

    /// Rounding policy applied to results
    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    /// Currency of the results
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Computes the totals for the given lines and discount
    ///
    /// # Arguments
    ///
    /// * `lines` - Invoice rows in document order; may be empty
    /// * `discount` - Invoice-level discount; ignored when absent or disabled
    pub fn compute(&self, lines: &[LineItem], discount: Option<&DiscountConfig>) -> TotalsResult {
        let net_total = lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.net()));

        let discount_amount = discount
            .map(|d| d.amount_for(net_total))
            .unwrap_or(Decimal::ZERO);

        let net_after_discount = net_total.saturating_sub(discount_amount);

        let mut vat: Vec<(TaxRate, Decimal)> = Vec::new();
        for line in lines {
            let position_net = line.net();
            if position_net.is_zero() {
                continue;
            }

            let discounted = position_net.saturating_sub(discount_share(
                position_net,
                discount_amount,
                net_total,
            ));
            let line_vat = line.tax_rate.apply(discounted);

            match vat.iter_mut().find(|(rate, _)| *rate == line.tax_rate) {
                Some((_, amount)) => *amount = amount.saturating_add(line_vat),
                None => vat.push((line.tax_rate, line_vat)),
            }
        }

        let total_vat = vat
            .iter()
            .fold(Decimal::ZERO, |acc, (_, amount)| acc.saturating_add(*amount));
        let gross_total = net_after_discount.saturating_add(total_vat);

        TotalsResult {
            currency: self.currency,
            net_total: self.present(net_total),
            discount_amount: self.present(discount_amount),
            net_after_discount: self.present(net_after_discount),
            vat_amounts: VatBreakdown(
                vat.into_iter()
                    .map(|(rate, amount)| VatAmount {
                        rate,
                        amount: self.present(amount),
                    })
                    .collect(),
            ),
            total_vat: self.present(total_vat),
            gross_total: self.present(gross_total),
        }
    }

    fn present(&self, value: Decimal) -> Decimal {
        let dp = self.currency.decimal_places();
        let mut rounded = self.rounding.round(value, dp);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded.rescale(dp);
        rounded
    }
}

/// The part of the invoice discount borne by one line
///
/// Proportional to the line's share of the net total. With a zero net total
/// there is no share to compute and the line bears nothing.
fn discount_share(position_net: Decimal, discount_amount: Decimal, net_total: Decimal) -> Decimal {
    if discount_amount.is_zero() || net_total.is_zero() {
        return Decimal::ZERO;
    }
    position_net
        .checked_mul(discount_amount)
        .and_then(|scaled| scaled.checked_div(net_total))
        .or_else(|| {
            discount_amount
                .checked_div(net_total)
                .and_then(|ratio| ratio.checked_mul(position_net))
        })
        .unwrap_or(Decimal::ZERO)
}

/// VAT owed at one rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VatAmount {
    pub rate: TaxRate,
    pub amount: Decimal,
}

/// VAT per rate, in the order rates first appeared on the invoice
///
/// Serializes as a JSON object keyed by the rate's numeric form
/// (`{"19": "38.00", "7": "3.50"}`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VatBreakdown(Vec<VatAmount>);

impl VatBreakdown {
    /// Amount for a rate key such as `"19"`
    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.0
            .iter()
            .find(|entry| entry.rate.key() == key)
            .map(|entry| entry.amount)
    }

    /// Amount for a rate
    pub fn get_rate(&self, rate: TaxRate) -> Option<Decimal> {
        self.0
            .iter()
            .find(|entry| entry.rate == rate)
            .map(|entry| entry.amount)
    }

    /// Rate keys in order
    pub fn keys(&self) -> Vec<String> {
        self.0.iter().map(|entry| entry.rate.key()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VatAmount> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for VatBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.rate.key(), &entry.amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VatBreakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = VatBreakdown;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from VAT rate to amount")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((key, amount)) = access.next_entry::<String, Decimal>()? {
                    let rate = key.parse::<Decimal>().map_err(|_| {
                        serde::de::Error::custom(format!("invalid VAT rate '{key}'"))
                    })?;
                    entries.push(VatAmount {
                        rate: TaxRate::from_percentage(rate),
                        amount,
                    });
                }
                Ok(VatBreakdown(entries))
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}

/// Computed invoice totals, rounded to currency precision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResult {
    /// Currency of every amount below
    pub currency: Currency,
    /// Sum of line nets before discount
    pub net_total: Decimal,
    /// Invoice-level discount
    pub discount_amount: Decimal,
    /// Net total minus discount; not clamped at zero
    pub net_after_discount: Decimal,
    /// VAT per rate
    pub vat_amounts: VatBreakdown,
    /// Sum of all VAT
    pub total_vat: Decimal,
    /// Net after discount plus VAT
    pub gross_total: Decimal,
}

impl TotalsResult {
    /// All-zero totals, as produced for an invoice without lines
    pub fn zero(currency: Currency) -> Self {
        TotalsEngine::new(RoundingPolicy::default(), currency).compute(&[], None)
    }

    /// Gross total as money
    pub fn gross(&self) -> Money {
        Money::new(self.gross_total, self.currency)
    }

    /// Net total as money
    pub fn net(&self) -> Money {
        Money::new(self.net_total, self.currency)
    }

    /// True if a discount reduced the net total
    pub fn is_discounted(&self) -> bool {
        !self.discount_amount.is_zero()
    }
}
