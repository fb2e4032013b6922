//! Currencies, rounding and money values
//!
//! Invoice arithmetic stays in exact `Decimal`. Values are brought to a
//! currency's minor unit only when they are presented, with an explicit
//! [`RoundingPolicy`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported invoice currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
    JPY,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::EUR,
        Currency::USD,
        Currency::GBP,
        Currency::CHF,
        Currency::JPY,
    ];

    // (code, symbol, minor-unit digits)
    fn properties(&self) -> (&'static str, &'static str, u32) {
        match self {
            Currency::EUR => ("EUR", "€", 2),
            Currency::USD => ("USD", "$", 2),
            Currency::GBP => ("GBP", "£", 2),
            Currency::CHF => ("CHF", "CHF", 2),
            Currency::JPY => ("JPY", "¥", 0),
        }
    }

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        self.properties().0
    }

    /// Symbol used in formatted amounts
    pub fn symbol(&self) -> &'static str {
        self.properties().1
    }

    /// Digits after the decimal separator in presented amounts
    pub fn decimal_places(&self) -> u32 {
        self.properties().2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or(MoneyError::UnknownCurrency(code))
    }
}

/// Errors from money values and their settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: expected {expected}, got {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Unknown rounding policy: {0}")]
    UnknownRounding(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// How midpoints are resolved when a value is rounded to currency precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Commercial rounding: 0.005 becomes 0.01, -0.005 becomes -0.01
    #[default]
    HalfUp,
    /// Banker's rounding: midpoints go to the even neighbour
    HalfEven,
}

impl RoundingPolicy {
    /// The matching rust_decimal strategy
    pub fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingPolicy::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingPolicy::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Rounds a value to `dp` decimal places
    pub fn round(&self, value: Decimal, dp: u32) -> Decimal {
        value.round_dp_with_strategy(dp, self.strategy())
    }
}

impl FromStr for RoundingPolicy {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "half_up" => Ok(RoundingPolicy::HalfUp),
            "half_even" | "bankers" => Ok(RoundingPolicy::HalfEven),
            other => Err(MoneyError::UnknownRounding(other.to_string())),
        }
    }
}

/// An amount in a currency
///
/// Carries full precision until [`Money::rounded`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Rounds to the currency's minor unit
    pub fn rounded(&self, policy: RoundingPolicy) -> Self {
        Self::new(
            policy.round(self.amount, self.currency.decimal_places()),
            self.currency,
        )
    }

    /// Adds two amounts of the same currency
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                expected: self.currency,
                found: other.currency,
            });
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency))
            .ok_or(MoneyError::Overflow)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places() as usize;
        write!(f, "{} {:.*}", self.currency, dp, self.amount)
    }
}
