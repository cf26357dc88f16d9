//! Unit tests for the Money module
//!
//! Covers creation, conversion to provider minor units, and display.

use core_kernel::{Money, Currency, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::EUR);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_from_major_uses_whole_units() {
        let m = Money::from_major(5000, Currency::CHF);
        assert_eq!(m.amount(), dec!(5000));
        assert_eq!(m.currency(), Currency::CHF);
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
    }
}

mod minor_units {
    use super::*;

    #[test]
    fn test_whole_estimate_to_cents() {
        let m = Money::from_major(500, Currency::EUR);
        assert_eq!(m.to_minor_units(), Ok(50_000));
    }

    #[test]
    fn test_fractional_amount_rounds_to_nearest_cent() {
        let m = Money::new(dec!(12.345), Currency::EUR);
        assert_eq!(m.to_minor_units(), Ok(1234));
        let m = Money::new(dec!(12.355), Currency::EUR);
        assert_eq!(m.to_minor_units(), Ok(1236));
    }

    #[test]
    fn test_overflow_is_reported() {
        let m = Money::new(rust_decimal::Decimal::MAX, Currency::EUR);
        assert_eq!(m.to_minor_units(), Err(MoneyError::Overflow));
    }
}

mod display {
    use super::*;

    #[test]
    fn test_display_uses_symbol_and_currency_precision() {
        let m = Money::from_major(1200, Currency::EUR);
        assert_eq!(m.to_string(), "€ 1200.00");

        let yen = Money::from_major(1200, Currency::JPY);
        assert_eq!(yen.to_string(), "¥ 1200");
    }
}
