//! Invoice management
//!
//! An invoice owns its rows and optional discount and moves through a small
//! lifecycle: `Draft -> Sent -> Paid`, with `Overdue` reachable from `Sent`
//! once the due date has passed and `Cancelled` reachable from any unpaid
//! status. Rows and discount can only change while the invoice is a draft.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{Currency, CustomerId, InvoiceId, LineItemId};

use crate::discount::DiscountConfig;
use crate::error::InvoicingError;
use crate::line::LineItem;
use crate::totals::{TotalsEngine, TotalsResult};

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being edited
    Draft,
    /// Sent to the customer
    Sent,
    /// Fully paid
    Paid,
    /// Past due date and unpaid
    Overdue,
    /// Voided
    Cancelled,
}

impl InvoiceStatus {
    /// Returns true if moving to `next` is allowed
    pub fn can_transition_to(&self, next: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        matches!(
            (*self, next),
            (Draft, Sent)
                | (Sent, Paid)
                | (Sent, Overdue)
                | (Overdue, Paid)
                | (Draft, Cancelled)
                | (Sent, Cancelled)
                | (Overdue, Cancelled)
        )
    }

    /// Paid and cancelled invoices never change again
    pub fn is_final(&self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }
}

/// A row on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: LineItemId,
    #[serde(flatten)]
    pub item: LineItem,
}

/// An invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Human-readable number, e.g. `INV-2026-0001`
    pub number: String,
    /// Customer reference, when the customer is on file
    pub customer_id: Option<CustomerId>,
    /// Customer name as printed
    pub customer_name: String,
    /// Issue date
    pub issue_date: NaiveDate,
    /// Payment due date
    pub due_date: NaiveDate,
    /// Currency of all amounts
    pub currency: Currency,
    lines: Vec<InvoiceLine>,
    discount: Option<DiscountConfig>,
    status: InvoiceStatus,
    /// Free text printed below the totals
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a draft invoice
    ///
    /// # Arguments
    ///
    /// * `number` - Invoice number, usually from [`InvoiceNumberSequence`]
    /// * `customer_name` - Name printed on the invoice
    /// * `issue_date` - Date of issue
    /// * `due_date` - Payment due date
    /// * `currency` - Invoice currency
    pub fn new(
        number: impl Into<String>,
        customer_name: impl Into<String>,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: InvoiceId::new(),
            number: number.into(),
            customer_id: None,
            customer_name: customer_name.into(),
            issue_date,
            due_date,
            currency,
            lines: Vec::new(),
            discount: None,
            status: InvoiceStatus::Draft,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Links a customer record
    pub fn with_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Current status
    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    /// Rows in document order
    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    /// Invoice-level discount, if any
    pub fn discount(&self) -> Option<&DiscountConfig> {
        self.discount.as_ref()
    }

    /// Appends a row and returns its id
    pub fn add_line(&mut self, item: LineItem) -> Result<LineItemId, InvoicingError> {
        self.ensure_editable()?;
        let id = LineItemId::new();
        self.lines.push(InvoiceLine { id, item });
        self.touch();
        Ok(id)
    }

    /// Replaces a row's content
    pub fn update_line(&mut self, id: LineItemId, item: LineItem) -> Result<(), InvoicingError> {
        self.ensure_editable()?;
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or(InvoicingError::LineNotFound(id))?;
        line.item = item;
        self.touch();
        Ok(())
    }

    /// Removes a row
    pub fn remove_line(&mut self, id: LineItemId) -> Result<LineItem, InvoicingError> {
        self.ensure_editable()?;
        let index = self
            .lines
            .iter()
            .position(|line| line.id == id)
            .ok_or(InvoicingError::LineNotFound(id))?;
        let removed = self.lines.remove(index);
        self.touch();
        Ok(removed.item)
    }

    /// Sets or clears the discount
    pub fn set_discount(&mut self, discount: Option<DiscountConfig>) -> Result<(), InvoicingError> {
        self.ensure_editable()?;
        self.discount = discount;
        self.touch();
        Ok(())
    }

    /// Line items in document order, as the totals engine consumes them
    pub fn line_items(&self) -> Vec<LineItem> {
        self.lines.iter().map(|line| line.item.clone()).collect()
    }

    /// Computes the invoice totals in the invoice's currency
    ///
    /// Only the rounding policy is taken from `engine`.
    pub fn totals(&self, engine: &TotalsEngine) -> TotalsResult {
        TotalsEngine::new(engine.rounding(), self.currency)
            .compute(&self.line_items(), self.discount.as_ref())
    }

    /// Marks the invoice as sent; it must have at least one row
    pub fn mark_sent(&mut self) -> Result<(), InvoicingError> {
        if self.lines.is_empty() {
            return Err(InvoicingError::EmptyInvoice);
        }
        self.transition(InvoiceStatus::Sent)
    }

    /// Marks the invoice as paid
    pub fn mark_paid(&mut self) -> Result<(), InvoicingError> {
        self.transition(InvoiceStatus::Paid)
    }

    /// Cancels the invoice
    pub fn cancel(&mut self) -> Result<(), InvoicingError> {
        self.transition(InvoiceStatus::Cancelled)
    }

    /// Returns true if the invoice is unpaid and past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        matches!(self.status, InvoiceStatus::Sent | InvoiceStatus::Overdue) && today > self.due_date
    }

    /// Moves a sent invoice to `Overdue` when its due date has passed
    ///
    /// Returns whether the status changed.
    pub fn refresh_overdue(&mut self, today: NaiveDate) -> bool {
        if self.status == InvoiceStatus::Sent && today > self.due_date {
            self.status = InvoiceStatus::Overdue;
            self.touch();
            tracing::info!(number = %self.number, "invoice overdue");
            return true;
        }
        false
    }

    fn transition(&mut self, next: InvoiceStatus) -> Result<(), InvoicingError> {
        if !self.status.can_transition_to(next) {
            return Err(InvoicingError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        tracing::info!(
            number = %self.number,
            from = ?self.status,
            to = ?next,
            "invoice status changed"
        );
        self.status = next;
        self.touch();
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), InvoicingError> {
        if self.status != InvoiceStatus::Draft {
            return Err(InvoicingError::NotEditable(self.status));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Hands out invoice numbers of the form `INV-2026-0001`
///
/// Numbering restarts at 1 every calendar year.
#[derive(Debug, Clone)]
pub struct InvoiceNumberSequence {
    prefix: String,
    last_by_year: HashMap<i32, u32>,
}

impl Default for InvoiceNumberSequence {
    fn default() -> Self {
        Self::new("INV")
    }
}

impl InvoiceNumberSequence {
    /// Creates a sequence with the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last_by_year: HashMap::new(),
        }
    }

    /// Continues numbering after `last` for `year`, e.g. after loading stored invoices
    pub fn resume(&mut self, year: i32, last: u32) {
        let entry = self.last_by_year.entry(year).or_insert(0);
        *entry = (*entry).max(last);
    }

    /// Returns the next number for an invoice issued on `issue_date`
    pub fn next_number(&mut self, issue_date: NaiveDate) -> String {
        let counter = self.last_by_year.entry(issue_date.year()).or_insert(0);
        *counter += 1;
        format!("{}-{}-{:04}", self.prefix, issue_date.year(), counter)
    }
}
