//! Invoicing domain errors
//!
//! The totals engine itself never fails; these errors cover the invoice
//! lifecycle and the in-memory register around it.

use thiserror::Error;

use core_kernel::{CoreError, InvoiceId, LineItemId, MoneyError};

use crate::invoice::InvoiceStatus;

/// Errors that can occur in the invoicing domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoicingError {
    /// Invoice not found
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// Invoice number already taken
    #[error("Invoice number already exists: {0}")]
    DuplicateNumber(String),

    /// Line not found on the invoice
    #[error("Line item not found: {0}")]
    LineNotFound(LineItemId),

    /// Status change not allowed from the current status
    #[error("Invalid status transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    /// Content changes are only allowed while the invoice is a draft
    #[error("Invoice is not editable in status {0:?}")]
    NotEditable(InvoiceStatus),

    /// An invoice without lines cannot be sent
    #[error("Invoice has no line items")]
    EmptyInvoice,

    /// Money operation failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl From<InvoicingError> for CoreError {
    fn from(err: InvoicingError) -> Self {
        let message = err.to_string();
        match err {
            InvoicingError::InvoiceNotFound(_) | InvoicingError::LineNotFound(_) => {
                CoreError::not_found(message)
            }
            InvoicingError::InvalidTransition { .. } | InvoicingError::NotEditable(_) => {
                CoreError::invalid_state(message)
            }
            InvoicingError::Money(inner) => CoreError::Money(inner),
            InvoicingError::DuplicateNumber(_) | InvoicingError::EmptyInvoice => {
                CoreError::validation(message)
            }
        }
    }
}
