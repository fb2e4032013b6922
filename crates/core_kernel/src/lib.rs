//! Core Kernel - Foundational types for Paybill
//!
//! This crate provides the building blocks shared by the invoicing crates:
//! - Currencies, money values and the rounding policy for presented amounts
//! - VAT rates
//! - Strongly-typed identifiers

pub mod money;
pub mod vat;
pub mod identifiers;
pub mod error;

pub use money::{Currency, Money, MoneyError, RoundingPolicy};
pub use vat::TaxRate;
pub use identifiers::{CustomerId, InvoiceId, LineItemId};
pub use error::CoreError;
