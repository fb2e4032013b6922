//! Unit tests for money, currencies, rounding and VAT rates

use core_kernel::{Currency, Money, MoneyError, RoundingPolicy, TaxRate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod money {
    use super::*;

    #[test]
    fn test_new_keeps_full_precision() {
        let m = Money::new(dec!(100.123456789), Currency::EUR);
        assert_eq!(m.amount(), dec!(100.123456789));
        assert_eq!(m.currency(), Currency::EUR);
    }

    #[test]
    fn test_zero() {
        assert!(Money::zero(Currency::CHF).is_zero());
        assert!(!Money::new(dec!(-0.01), Currency::CHF).is_zero());
    }

    #[test]
    fn test_checked_add_same_currency() {
        let net = Money::new(dec!(250.00), Currency::EUR);
        let vat = Money::new(dec!(41.50), Currency::EUR);
        assert_eq!(net.checked_add(&vat).unwrap().amount(), dec!(291.50));
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Money::new(Decimal::MAX, Currency::EUR);
        assert_eq!(max.checked_add(&max), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_checked_add_mismatch() {
        let eur = Money::new(dec!(1), Currency::EUR);
        let gbp = Money::new(dec!(1), Currency::GBP);
        assert_eq!(
            eur.checked_add(&gbp),
            Err(MoneyError::CurrencyMismatch {
                expected: Currency::EUR,
                found: Currency::GBP
            })
        );
    }

    #[test]
    fn test_display_uses_currency_precision() {
        assert_eq!(Money::new(dec!(291.5), Currency::EUR).to_string(), "EUR 291.50");
        assert_eq!(Money::new(dec!(1500), Currency::JPY).to_string(), "JPY 1500");
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_half_up_is_default() {
        assert_eq!(RoundingPolicy::default(), RoundingPolicy::HalfUp);
    }

    #[test]
    fn test_rounded_uses_currency_precision() {
        let eur = Money::new(dec!(10.555), Currency::EUR).rounded(RoundingPolicy::HalfUp);
        assert_eq!(eur.amount(), dec!(10.56));

        let jpy = Money::new(dec!(10.5), Currency::JPY).rounded(RoundingPolicy::HalfUp);
        assert_eq!(jpy.amount(), dec!(11));
    }

    #[test]
    fn test_half_even_on_money() {
        let m = Money::new(dec!(2.345), Currency::EUR).rounded(RoundingPolicy::HalfEven);
        assert_eq!(m.amount(), dec!(2.34));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("half_up".parse::<RoundingPolicy>(), Ok(RoundingPolicy::HalfUp));
        assert_eq!("Half-Even".parse::<RoundingPolicy>(), Ok(RoundingPolicy::HalfEven));
        assert_eq!("bankers".parse::<RoundingPolicy>(), Ok(RoundingPolicy::HalfEven));
        assert_eq!(
            "truncate".parse::<RoundingPolicy>(),
            Err(MoneyError::UnknownRounding("truncate".to_string()))
        );
    }

    #[test]
    fn test_policy_serde_names() {
        let policy: RoundingPolicy = serde_json::from_str("\"half_even\"").unwrap();
        assert_eq!(policy, RoundingPolicy::HalfEven);
        assert_eq!(serde_json::to_string(&RoundingPolicy::HalfUp).unwrap(), "\"half_up\"");
    }
}

mod currency {
    use super::*;

    #[test]
    fn test_default_currency_is_euro() {
        assert_eq!(Currency::default(), Currency::EUR);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("eur".parse::<Currency>(), Ok(Currency::EUR));
        assert_eq!(" CHF ".parse::<Currency>(), Ok(Currency::CHF));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "xyz".parse::<Currency>(),
            Err(MoneyError::UnknownCurrency("XYZ".to_string()))
        );
    }

    #[test]
    fn test_symbols_and_precision() {
        assert_eq!(Currency::EUR.symbol(), "€");
        assert_eq!(Currency::EUR.to_string(), "EUR");
        assert_eq!(Currency::EUR.decimal_places(), 2);
        assert_eq!(Currency::JPY.decimal_places(), 0);
    }
}

mod tax_rate {
    use super::*;

    #[test]
    fn test_standard_rate_is_default() {
        assert_eq!(TaxRate::default().percentage(), dec!(19));
        assert_eq!(TaxRate::default(), TaxRate::STANDARD_DE);
    }

    #[test]
    fn test_fraction_and_display() {
        let rate = TaxRate::from_percentage(dec!(7));
        assert_eq!(rate.as_fraction(), dec!(0.07));
        assert_eq!(rate.to_string(), "7%");
    }

    #[test]
    fn test_apply_is_unrounded() {
        let rate = TaxRate::from_percentage(dec!(19));
        assert_eq!(rate.apply(dec!(0.05)), dec!(0.0095));
    }

    #[test]
    fn test_zero_rate() {
        let rate = TaxRate::from_percentage(dec!(0.00));
        assert!(rate.is_zero());
        assert_eq!(rate.key(), "0");
    }

    #[test]
    fn test_deserialized_rate_is_normalized() {
        let rate: TaxRate = serde_json::from_str("\"7.50\"").unwrap();
        assert_eq!(rate.key(), "7.5");
        assert_eq!(serde_json::to_string(&rate).unwrap(), "\"7.5\"");
    }
}
