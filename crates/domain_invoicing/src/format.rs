//! Display formatting for amounts, dates and rates
//!
//! Used by the editing surface and the document totals block. Only two
//! locales are supported: German (`1.234,56 €`, `16.10.2026`) and English
//! (`€1,234.56`, `2026-10-16`).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use core_kernel::{Currency, Money, RoundingPolicy, TaxRate};

/// Output locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    De,
    En,
}

impl Locale {
    fn separators(&self) -> (char, char) {
        match self {
            Locale::De => ('.', ','),
            Locale::En => (',', '.'),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" | "de-de" | "de_de" => Ok(Locale::De),
            "en" | "en-us" | "en_us" | "en-gb" | "en_gb" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}

/// Formats an amount in the given currency
///
/// The amount is rounded to the currency's precision first.
pub fn format_currency(
    amount: Decimal,
    currency: Currency,
    locale: Locale,
    rounding: RoundingPolicy,
) -> String {
    let dp = currency.decimal_places();
    let rounded = rounding.round(amount, dp);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = group_digits(rounded.abs(), dp, locale);
    let sign = if negative { "-" } else { "" };

    match locale {
        Locale::De => format!("{sign}{digits} {}", currency.symbol()),
        Locale::En => format!("{sign}{}{digits}", currency.symbol()),
    }
}

/// Formats a money value
pub fn format_money(money: &Money, locale: Locale, rounding: RoundingPolicy) -> String {
    format_currency(money.amount(), money.currency(), locale, rounding)
}

/// Formats a calendar date
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::De => date.format("%d.%m.%Y").to_string(),
        Locale::En => date.format("%Y-%m-%d").to_string(),
    }
}

/// Formats a VAT rate (`19 %` in German, `19%` in English)
pub fn format_rate(rate: TaxRate, locale: Locale) -> String {
    match locale {
        Locale::De => format!("{} %", rate.key().replace('.', ",")),
        Locale::En => format!("{}%", rate.key()),
    }
}

/// Formats a plain quantity without trailing zeros
pub fn format_quantity(quantity: Decimal, locale: Locale) -> String {
    let text = quantity.normalize().to_string();
    match locale {
        Locale::De => text.replace('.', ","),
        Locale::En => text,
    }
}

fn group_digits(value: Decimal, dp: u32, locale: Locale) -> String {
    let (group_sep, decimal_sep) = locale.separators();
    let text = format!("{:.*}", dp as usize, value);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{grouped}{decimal_sep}{frac}"),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_german_currency() {
        let text = format_currency(dec!(1234.5), Currency::EUR, Locale::De, RoundingPolicy::HalfUp);
        assert_eq!(text, "1.234,50 €");
    }

    #[test]
    fn test_english_currency() {
        let text = format_currency(
            dec!(1234567.891),
            Currency::EUR,
            Locale::En,
            RoundingPolicy::HalfUp,
        );
        assert_eq!(text, "€1,234,567.89");
    }

    #[test]
    fn test_negative_and_zero() {
        assert_eq!(
            format_currency(dec!(-25), Currency::EUR, Locale::De, RoundingPolicy::HalfUp),
            "-25,00 €"
        );
        assert_eq!(
            format_currency(dec!(-0.001), Currency::EUR, Locale::En, RoundingPolicy::HalfUp),
            "€0.00"
        );
    }

    #[test]
    fn test_yen_has_no_decimals() {
        assert_eq!(
            format_currency(dec!(1500), Currency::JPY, Locale::En, RoundingPolicy::HalfUp),
            "¥1,500"
        );
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(format_date(date, Locale::De), "16.10.2026");
        assert_eq!(format_date(date, Locale::En), "2026-10-16");
    }

    #[test]
    fn test_rates_and_quantities() {
        let rate = TaxRate::from_percentage(dec!(7.5));
        assert_eq!(format_rate(rate, Locale::De), "7,5 %");
        assert_eq!(format_rate(rate, Locale::En), "7.5%");
        assert_eq!(format_quantity(dec!(2.50), Locale::De), "2,5");
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("de-DE".parse::<Locale>(), Ok(Locale::De));
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }
}
