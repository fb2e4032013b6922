//! Totals block for rendered invoice documents
//!
//! Builds the already-formatted rows a document template prints: one row per
//! invoice line and the totals section (net, discount, VAT per rate, gross).
//! Layout and rendering belong to the document generator.

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{Currency, TaxRate};

use crate::discount::{DiscountConfig, DiscountType};
use crate::format::{self, Locale};
use crate::line::LineItem;
use crate::totals::{TotalsEngine, TotalsResult};

/// A formatted invoice row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLine {
    pub position: usize,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub tax_rate: String,
    pub net: String,
}

/// A formatted totals row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsRow {
    pub label: String,
    pub amount: String,
    /// Gross total row, usually printed bold
    pub emphasized: bool,
}

/// Everything a document template needs to print lines and totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentTotals {
    pub lines: Vec<DocumentLine>,
    pub rows: Vec<TotalsRow>,
    /// Unformatted totals, for templates that format themselves
    pub totals: TotalsResult,
}

struct Labels {
    net: &'static str,
    discount: &'static str,
    net_after_discount: &'static str,
    vat: &'static str,
    gross: &'static str,
    unnamed_line: &'static str,
}

fn labels(locale: Locale) -> Labels {
    match locale {
        Locale::De => Labels {
            net: "Nettobetrag",
            discount: "Rabatt",
            net_after_discount: "Nettobetrag nach Rabatt",
            vat: "MwSt.",
            gross: "Gesamtbetrag",
            unnamed_line: "Position",
        },
        Locale::En => Labels {
            net: "Net total",
            discount: "Discount",
            net_after_discount: "Net after discount",
            vat: "VAT",
            gross: "Total",
            unnamed_line: "Item",
        },
    }
}

impl DocumentTotals {
    /// Computes totals and formats them for `locale`
    pub fn build(
        lines: &[LineItem],
        discount: Option<&DiscountConfig>,
        engine: &TotalsEngine,
        locale: Locale,
    ) -> Self {
        let totals = engine.compute(lines, discount);
        let currency = engine.currency();
        let rounding = engine.rounding();
        let money = |amount: Decimal| format::format_currency(amount, currency, locale, rounding);
        let text = labels(locale);

        let document_lines = lines
            .iter()
            .enumerate()
            .map(|(index, line)| DocumentLine {
                position: index + 1,
                description: line
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("{} {}", text.unnamed_line, index + 1)),
                quantity: format::format_quantity(line.quantity, locale),
                unit_price: money(line.unit_price),
                tax_rate: format::format_rate(line.tax_rate, locale),
                net: money(line.net()),
            })
            .collect();

        let mut rows = vec![row(text.net, money(totals.net_total))];

        if totals.is_discounted() {
            let label = match discount {
                Some(d) if d.discount_type == DiscountType::Percentage => format!(
                    "{} ({})",
                    text.discount,
                    format::format_rate(TaxRate::from_percentage(d.value), locale)
                ),
                _ => text.discount.to_string(),
            };
            rows.push(TotalsRow {
                label,
                amount: money(-totals.discount_amount),
                emphasized: false,
            });
            rows.push(row(text.net_after_discount, money(totals.net_after_discount)));
        }

        for entry in totals.vat_amounts.iter() {
            rows.push(TotalsRow {
                label: format!("{} {}", text.vat, format::format_rate(entry.rate, locale)),
                amount: money(entry.amount),
                emphasized: false,
            });
        }

        rows.push(TotalsRow {
            label: text.gross.to_string(),
            amount: money(totals.gross_total),
            emphasized: true,
        });

        Self {
            lines: document_lines,
            rows,
            totals,
        }
    }

    /// Currency of the block
    pub fn currency(&self) -> Currency {
        self.totals.currency
    }

    /// Renders the totals rows as aligned plain text, one per line
    pub fn to_plain_text(&self) -> String {
        let width = self.rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
        self.rows
            .iter()
            .map(|r| format!("{:<width$}  {:>14}", r.label, r.amount, width = width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn row(label: &str, amount: String) -> TotalsRow {
    TotalsRow {
        label: label.to_string(),
        amount,
        emphasized: false,
    }
}
