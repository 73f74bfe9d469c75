//! Type-safe monetary value with embedded currency.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Currencies accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Currency {
    USD,
    CAD,
    EUR,
    GBP,
    AUD,
    NZD,
    CHF,
    DKK,
    NOK,
    PLN,
    SEK,
    INR,
    JPY,
}

impl Currency {
    /// Returns the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::CAD => "CAD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::AUD => "AUD",
            Currency::NZD => "NZD",
            Currency::CHF => "CHF",
            Currency::DKK => "DKK",
            Currency::NOK => "NOK",
            Currency::PLN => "PLN",
            Currency::SEK => "SEK",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(u32::from(self.decimal_places()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "CAD" => Ok(Currency::CAD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "AUD" => Ok(Currency::AUD),
            "NZD" => Ok(Currency::NZD),
            "CHF" => Ok(Currency::CHF),
            "DKK" => Ok(Currency::DKK),
            "NOK" => Ok(Currency::NOK),
            "PLN" => Ok(Currency::PLN),
            "SEK" => Ok(Currency::SEK),
            "INR" => Ok(Currency::INR),
            "JPY" => Ok(Currency::JPY),
            _ => Err(DomainError::UnsupportedCurrency(s.to_string())),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Type-safe money representation with embedded currency.
///
/// Amount is stored in the smallest unit of the currency (cents, paise, etc.)
/// to avoid floating-point precision issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MoneyParts")]
pub struct Money {
    amount: i64,
    currency: Currency,
}

#[derive(Deserialize)]
struct MoneyParts {
    amount: i64,
    currency: Currency,
}

impl TryFrom<MoneyParts> for Money {
    type Error = DomainError;

    fn try_from(parts: MoneyParts) -> Result<Self, Self::Error> {
        Money::new(parts.amount, parts.currency)
    }
}

impl Money {
    /// Creates a new Money value.
    pub fn new(amount: i64, currency: Currency) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self { amount, currency })
    }

    /// Parses a major-unit decimal string such as `"10.00"`.
    ///
    /// Trailing zeros beyond the currency precision are accepted, any other
    /// extra fractional digit is rejected.
    pub fn from_decimal(value: &str, currency: Currency) -> Result<Self, DomainError> {
        let decimal = Decimal::from_str(value.trim())
            .map_err(|_| DomainError::InvalidAmount(format!("'{}' is not a decimal", value)))?
            .normalize();

        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(DomainError::NegativeAmount);
        }
        if decimal.scale() > u32::from(currency.decimal_places()) {
            return Err(DomainError::InvalidAmount(format!(
                "precision of '{}' is too high for {}",
                value, currency
            )));
        }

        let minor = decimal
            .checked_mul(Decimal::from(currency.minor_per_major()))
            .and_then(|minor| minor.to_i64())
            .ok_or_else(|| DomainError::InvalidAmount(format!("'{}' is out of range", value)))?;

        Self::new(minor, currency)
    }

    /// Returns the amount in smallest currency unit.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Checked addition - returns error if currencies don't match.
    pub fn checked_add(&self, other: Money) -> Result<Money, DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                expected: self.currency,
                got: other.currency,
            });
        }
        Ok(Money {
            amount: self.amount.saturating_add(other.amount),
            currency: self.currency,
        })
    }

    /// Divides into `divisor` equal shares, rounding half up to the nearest
    /// minor unit.
    pub fn divide(&self, divisor: u32) -> Result<Money, DomainError> {
        if divisor == 0 {
            return Err(DomainError::ValidationError("Cannot divide by zero".into()));
        }
        let divisor = i128::from(divisor);
        let share = (i128::from(self.amount) * 2 + divisor) / (divisor * 2);
        Ok(Money {
            // share <= amount, so it always fits back into an i64
            amount: share as i64,
            currency: self.currency,
        })
    }

    /// Multiplies by an integer quantity.
    pub fn multiply(&self, factor: u32) -> Result<Money, DomainError> {
        let amount = self
            .amount
            .checked_mul(i64::from(factor))
            .ok_or_else(|| DomainError::InvalidAmount("multiplication overflow".into()))?;
        Ok(Money {
            amount,
            currency: self.currency,
        })
    }

    /// Renders the amount in major units, e.g. `1000` USD as `"10.00"`.
    pub fn to_decimal_string(&self) -> String {
        let places = usize::from(self.currency.decimal_places());
        if places == 0 {
            return self.amount.to_string();
        }
        let per_major = self.currency.minor_per_major();
        format!(
            "{}.{:0width$}",
            self.amount / per_major,
            self.amount % per_major,
            width = places
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_decimal_string(), self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let money = Money::new(1000, Currency::USD).unwrap();
        assert_eq!(money.amount(), 1000);
        assert_eq!(money.currency(), Currency::USD);
    }

    #[test]
    fn test_negative_money_fails() {
        let result = Money::new(-100, Currency::USD);
        assert!(matches!(result, Err(DomainError::NegativeAmount)));
    }

    #[test]
    fn test_deserialize_rejects_negative_amount() {
        let result = serde_json::from_str::<Money>(r#"{"amount":-500,"currency":"USD"}"#);
        assert!(result.is_err());

        let money = serde_json::from_str::<Money>(r#"{"amount":500,"currency":"USD"}"#).unwrap();
        assert_eq!(money, Money::new(500, Currency::USD).unwrap());
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = Money::new(100, Currency::USD).unwrap();
        let eur = Money::new(50, Currency::EUR).unwrap();
        let result = usd.checked_add(eur);
        assert!(matches!(result, Err(DomainError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_currency_parse_is_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!(" Gbp ".parse::<Currency>().unwrap(), Currency::GBP);
        assert!(matches!(
            "XYZ".parse::<Currency>(),
            Err(DomainError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(
            Money::from_decimal("10.00", Currency::USD).unwrap().amount(),
            1000
        );
        assert_eq!(Money::from_decimal("7", Currency::USD).unwrap().amount(), 700);
        assert_eq!(Money::from_decimal("0.5", Currency::EUR).unwrap().amount(), 50);
        assert_eq!(Money::from_decimal("1500", Currency::JPY).unwrap().amount(), 1500);
        assert_eq!(
            Money::from_decimal("3.100", Currency::USD).unwrap().amount(),
            310
        );
    }

    #[test]
    fn test_from_decimal_rejects_bad_input() {
        assert!(matches!(
            Money::from_decimal("1.234", Currency::USD),
            Err(DomainError::InvalidAmount(_))
        ));
        assert!(matches!(
            Money::from_decimal("12.5", Currency::JPY),
            Err(DomainError::InvalidAmount(_))
        ));
        assert!(matches!(
            Money::from_decimal("-1.00", Currency::USD),
            Err(DomainError::NegativeAmount)
        ));
        assert!(matches!(
            Money::from_decimal("ten", Currency::USD),
            Err(DomainError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_from_decimal_out_of_range() {
        assert!(matches!(
            Money::from_decimal("79228162514264337593543950335", Currency::USD),
            Err(DomainError::InvalidAmount(_))
        ));
        assert!(matches!(
            Money::from_decimal("92233720368547758.08", Currency::USD),
            Err(DomainError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_divide_rounds_half_up() {
        let money = Money::new(1000, Currency::USD).unwrap();
        assert_eq!(money.divide(3).unwrap().amount(), 333);
        assert_eq!(money.divide(4).unwrap().amount(), 250);

        let odd = Money::new(5, Currency::USD).unwrap();
        assert_eq!(odd.divide(2).unwrap().amount(), 3);
    }

    #[test]
    fn test_divide_by_zero_fails() {
        let money = Money::new(1000, Currency::USD).unwrap();
        assert!(matches!(
            money.divide(0),
            Err(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn test_to_decimal_string() {
        assert_eq!(Money::new(1000, Currency::USD).unwrap().to_decimal_string(), "10.00");
        assert_eq!(Money::new(5, Currency::USD).unwrap().to_decimal_string(), "0.05");
        assert_eq!(Money::new(1500, Currency::JPY).unwrap().to_decimal_string(), "1500");
    }

    #[test]
    fn test_money_display() {
        let money = Money::new(1050, Currency::USD).unwrap();
        assert_eq!(format!("{}", money), "10.50 USD");
    }
}
