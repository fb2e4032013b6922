//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out the fields that
//! matter to them.

use chrono::NaiveDate;
use core_kernel::{Currency, TaxRate};
use domain_invoicing::{DiscountConfig, Invoice, LineItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::DateFixtures;

/// Builder for line items
pub struct LineItemBuilder {
    description: Option<String>,
    quantity: Decimal,
    unit_price: Decimal,
    tax_rate: TaxRate,
}

impl Default for LineItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemBuilder {
    /// One unit at 100.00, 19 %
    pub fn new() -> Self {
        Self {
            description: None,
            quantity: dec!(1),
            unit_price: dec!(100),
            tax_rate: TaxRate::from_percentage(dec!(19)),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn tax_rate(mut self, percentage: Decimal) -> Self {
        self.tax_rate = TaxRate::from_percentage(percentage);
        self
    }

    pub fn build(self) -> LineItem {
        let line = LineItem::new(self.quantity, self.unit_price, self.tax_rate);
        match self.description {
            Some(description) => line.with_description(description),
            None => line,
        }
    }
}

/// Builder for draft invoices
pub struct InvoiceBuilder {
    number: String,
    customer_name: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    currency: Currency,
    lines: Vec<LineItem>,
    discount: Option<DiscountConfig>,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self {
            number: "INV-2026-0001".to_string(),
            customer_name: "Musterfirma GmbH".to_string(),
            issue_date: DateFixtures::issue_date(),
            due_date: DateFixtures::due_date(),
            currency: Currency::EUR,
            lines: Vec::new(),
            discount: None,
        }
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = date;
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    pub fn lines(mut self, lines: impl IntoIterator<Item = LineItem>) -> Self {
        self.lines.extend(lines);
        self
    }

    pub fn discount(mut self, discount: DiscountConfig) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Builds a draft invoice
    ///
    /// # Panics
    ///
    /// Never for a fresh draft; editing only fails on non-draft invoices.
    pub fn build(self) -> Invoice {
        let mut invoice = Invoice::new(
            self.number,
            self.customer_name,
            self.issue_date,
            self.due_date,
            self.currency,
        );
        for line in self.lines {
            invoice.add_line(line).expect("draft accepts lines");
        }
        invoice
            .set_discount(self.discount)
            .expect("draft accepts a discount");
        invoice
    }
}
