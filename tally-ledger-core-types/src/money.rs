use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::Currency;

/// A monetary amount as integer minor units of its currency.
///
/// Amounts are signed: negative values are how adjustment lines carry
/// reversing deltas. The debit/credit sign used by balance checks is a
/// separate concern, derived from the movement's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    minor_units: i64,
    currency: Currency,
}

impl Money {
    pub fn new(minor_units: i64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    pub fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    /// `None` on currency mismatch or overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.minor_units
            .checked_add(other.minor_units)
            .map(|minor_units| Self::new(minor_units, self.currency))
    }

    /// `None` on currency mismatch or overflow.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.minor_units
            .checked_sub(other.minor_units)
            .map(|minor_units| Self::new(minor_units, self.currency))
    }

    pub fn major_units(&self) -> Decimal {
        Decimal::new(self.minor_units, self.currency.exponent())
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.major_units(), self.currency)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn usd() -> Currency {
        "USD".parse().unwrap()
    }

    #[test]
    fn checked_arithmetic() {
        let a = Money::new(1_000, usd());
        let b = Money::new(250, usd());
        assert_eq!(a.checked_add(b), Some(Money::new(1_250, usd())));
        assert_eq!(b.checked_sub(a), Some(Money::new(-750, usd())));
        assert!(b.checked_sub(a).unwrap().is_negative());
    }

    #[test]
    fn mismatched_currencies_do_not_combine() {
        let a = Money::new(1_000, usd());
        let b = Money::new(1_000, "EUR".parse().unwrap());
        assert_eq!(a.checked_add(b), None);
        assert_eq!(a.checked_sub(b), None);
    }

    #[test]
    fn overflow_is_detected() {
        let a = Money::new(i64::MAX, usd());
        assert_eq!(a.checked_add(Money::new(1, usd())), None);
    }

    #[test]
    fn major_units_use_the_currency_exponent() {
        assert_eq!(Money::new(12_345, usd()).major_units(), dec!(123.45));
        assert_eq!(
            Money::new(5_000, "JPY".parse().unwrap()).major_units(),
            dec!(5000)
        );
    }

    #[test]
    fn displays_major_units_with_code() {
        assert_eq!(Money::new(150_000, usd()).to_string(), "1500.00 USD");
    }
}
