//! Invoicing Domain - Invoice Totals
//!
//! This crate computes invoice totals and provides the invoice model around
//! that computation.
//!
//! # Totals
//!
//! [`compute_totals`] (or a configured [`TotalsEngine`]) takes the invoice
//! rows and an optional invoice-level discount and returns net total,
//! discount, VAT per rate, total VAT and gross total. The discount is
//! pro-rated across rows before VAT is applied, so every rate is taxed on
//! its discounted base. Amounts are exact decimals, rounded to currency
//! precision only in the result.
//!
//! # Input boundary
//!
//! Form and JSON input is loosely typed. [`RawLineItem`], [`RawDiscount`] and
//! [`InvoicePayload`] accept any shape and coerce it with a
//! [`CoercionPolicy`]: unusable quantities and prices become 0, unusable tax
//! rates become the configured default (19 %).
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_invoicing::{compute_totals, DiscountConfig, LineItem};
//! use core_kernel::TaxRate;
//!
//! let lines = vec![
//!     LineItem::new(dec!(2), dec!(100), TaxRate::from_percentage(dec!(19))),
//!     LineItem::new(dec!(1), dec!(50), TaxRate::from_percentage(dec!(7))),
//! ];
//! let totals = compute_totals(&lines, Some(&DiscountConfig::percentage(dec!(10))));
//! assert_eq!(totals.gross_total, dec!(262.35));
//! ```

pub mod coerce;
pub mod config;
pub mod discount;
pub mod document;
pub mod error;
pub mod format;
pub mod invoice;
pub mod line;
pub mod payload;
pub mod register;
pub mod totals;

pub use coerce::CoercionPolicy;
pub use config::EngineConfig;
pub use discount::{DiscountConfig, DiscountType, RawDiscount};
pub use document::{DocumentLine, DocumentTotals, TotalsRow};
pub use error::InvoicingError;
pub use format::Locale;
pub use invoice::{Invoice, InvoiceLine, InvoiceNumberSequence, InvoiceStatus};
pub use line::{LineItem, RawLineItem};
pub use payload::InvoicePayload;
pub use register::InvoiceRegister;
pub use totals::{compute_totals, TotalsEngine, TotalsResult, VatAmount, VatBreakdown};
