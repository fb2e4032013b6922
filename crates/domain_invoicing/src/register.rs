//! In-memory invoice register
//!
//! Holds invoices by id and keeps numbers unique. Persistence is someone
//! else's job; this is what the lifecycle and the CLI work against.

use chrono::NaiveDate;
use std::collections::HashMap;

use core_kernel::{Currency, InvoiceId, Money};

use crate::error::InvoicingError;
use crate::invoice::{Invoice, InvoiceNumberSequence, InvoiceStatus};
use crate::totals::TotalsEngine;

/// Invoices keyed by id, with a number sequence for new drafts
#[derive(Debug, Default)]
pub struct InvoiceRegister {
    invoices: HashMap<InvoiceId, Invoice>,
    sequence: InvoiceNumberSequence,
}

impl InvoiceRegister {
    /// Creates an empty register numbering with the given sequence
    pub fn new(sequence: InvoiceNumberSequence) -> Self {
        Self {
            invoices: HashMap::new(),
            sequence,
        }
    }

    /// Creates a draft with the next free number and returns its id
    pub fn create_draft(
        &mut self,
        customer_name: impl Into<String>,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        currency: Currency,
    ) -> InvoiceId {
        let mut number = self.sequence.next_number(issue_date);
        while self.find_by_number(&number).is_some() {
            number = self.sequence.next_number(issue_date);
        }

        let invoice = Invoice::new(number, customer_name, issue_date, due_date, currency);
        let id = invoice.id;
        tracing::info!(number = %invoice.number, "draft invoice created");
        self.invoices.insert(id, invoice);
        id
    }

    /// Adds an existing invoice; its number must be unused
    pub fn insert(&mut self, invoice: Invoice) -> Result<InvoiceId, InvoicingError> {
        if self.find_by_number(&invoice.number).is_some() {
            return Err(InvoicingError::DuplicateNumber(invoice.number));
        }
        let id = invoice.id;
        self.invoices.insert(id, invoice);
        Ok(id)
    }

    pub fn get(&self, id: InvoiceId) -> Result<&Invoice, InvoicingError> {
        self.invoices.get(&id).ok_or(InvoicingError::InvoiceNotFound(id))
    }

    pub fn get_mut(&mut self, id: InvoiceId) -> Result<&mut Invoice, InvoicingError> {
        self.invoices
            .get_mut(&id)
            .ok_or(InvoicingError::InvoiceNotFound(id))
    }

    /// Removes an invoice; only drafts can be deleted, others must be cancelled
    pub fn remove(&mut self, id: InvoiceId) -> Result<Invoice, InvoicingError> {
        let status = self.get(id)?.status();
        if status != InvoiceStatus::Draft {
            return Err(InvoicingError::NotEditable(status));
        }
        self.invoices
            .remove(&id)
            .ok_or(InvoicingError::InvoiceNotFound(id))
    }

    pub fn find_by_number(&self, number: &str) -> Option<&Invoice> {
        self.invoices.values().find(|invoice| invoice.number == number)
    }

    /// All invoices ordered by number
    pub fn list(&self) -> Vec<&Invoice> {
        let mut all: Vec<&Invoice> = self.invoices.values().collect();
        all.sort_by(|a, b| a.number.cmp(&b.number));
        all
    }

    /// Invoices in the given status, ordered by number
    pub fn list_by_status(&self, status: InvoiceStatus) -> Vec<&Invoice> {
        self.list()
            .into_iter()
            .filter(|invoice| invoice.status() == status)
            .collect()
    }

    /// Moves every sent invoice past its due date to `Overdue`
    ///
    /// Returns the number of invoices that changed.
    pub fn refresh_overdue(&mut self, today: NaiveDate) -> usize {
        self.invoices
            .values_mut()
            .map(|invoice| invoice.refresh_overdue(today))
            .filter(|changed| *changed)
            .count()
    }

    /// Gross amount still owed on sent and overdue invoices
    ///
    /// Fails if an unpaid invoice is in another currency.
    pub fn outstanding(
        &self,
        engine: &TotalsEngine,
        currency: Currency,
    ) -> Result<Money, InvoicingError> {
        let mut total = Money::zero(currency);
        for invoice in self.invoices.values() {
            if matches!(invoice.status(), InvoiceStatus::Sent | InvoiceStatus::Overdue) {
                total = total.checked_add(&invoice.totals(engine).gross())?;
            }
        }
        Ok(total)
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }
}
