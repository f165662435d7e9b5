//! Monetary types for assetbook.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A monetary amount with currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount value (high precision decimal).
    pub value: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money instance.
    pub fn new(value: Decimal, currency: Currency) -> Self {
        Self { value, currency }
    }

    /// Create from a string value.
    pub fn from_str(value: &str, currency: Currency) -> Result<Self, AmountParseError> {
        let value = value.parse().map_err(|source| AmountParseError {
            input: value.to_string(),
            source,
        })?;
        Ok(Self { value, currency })
    }

    /// Round to the currency's standard decimal places.
    pub fn round(&self) -> Self {
        let places = self.currency.decimal_places();
        Self {
            value: self.value.round_dp(places),
            currency: self.currency.clone(),
        }
    }
}

/// Renders the amount with its currency symbol, thousands grouping and the
/// currency's standard decimal places, e.g. `$1,234.56` or `kr12,000.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = self.currency.decimal_places() as usize;
        let rounded = self.value.abs().round_dp(self.currency.decimal_places());
        let text = rounded.to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int, frac)) => (int, frac.to_string()),
            None => (text.as_str(), String::new()),
        };
        let mut frac = frac_part;
        while frac.len() < places {
            frac.push('0');
        }
        let sign = if self.value.is_sign_negative() && !self.value.is_zero() {
            "-"
        } else {
            ""
        };
        if places == 0 {
            write!(f, "{}{}{}", sign, self.currency.symbol(), group_thousands(int_part))
        } else {
            write!(
                f,
                "{}{}{}.{}",
                sign,
                self.currency.symbol(),
                group_thousands(int_part),
                frac
            )
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Error when a money amount cannot be parsed.
#[derive(Debug, Error)]
#[error("Invalid amount {input:?}: {source}")]
pub struct AmountParseError {
    /// The rejected input text.
    pub input: String,
    #[source]
    source: rust_decimal::Error,
}

/// ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Get the standard decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self.0.as_str() {
            "JPY" | "KRW" | "VND" => 0,
            "BHD" | "KWD" | "OMR" => 3,
            _ => 2,
        }
    }

    /// Display symbol for the currencies the inventory report prints.
    /// Unlisted currencies render without a symbol.
    pub fn symbol(&self) -> &'static str {
        match self.0.as_str() {
            "USD" => "$",
            "EUR" => "\u{20ac}",
            "SEK" => "kr",
            _ => "",
        }
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn sek() -> Self {
        Self::new("SEK")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_code_uppercased() {
        assert_eq!(Currency::new("usd"), Currency::usd());
        assert_eq!(Currency::new("Sek").code(), "SEK");
    }

    #[test]
    fn test_currency_decimal_places() {
        assert_eq!(Currency::usd().decimal_places(), 2);
        assert_eq!(Currency::eur().decimal_places(), 2);
        assert_eq!(Currency::new("JPY").decimal_places(), 0);
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Currency::usd().symbol(), "$");
        assert_eq!(Currency::eur().symbol(), "\u{20ac}");
        assert_eq!(Currency::sek().symbol(), "kr");
        assert_eq!(Currency::new("NOK").symbol(), "");
    }

    #[test]
    fn test_money_display_grouping() {
        let m = Money::new(dec!(1234567.891), Currency::usd());
        assert_eq!(m.to_string(), "$1,234,567.89");

        let m = Money::new(dec!(950), Currency::sek());
        assert_eq!(m.to_string(), "kr950.00");

        let m = Money::new(dec!(12000.5), Currency::eur());
        assert_eq!(m.to_string(), "\u{20ac}12,000.50");
    }

    #[test]
    fn test_money_display_negative_and_zero_places() {
        let m = Money::new(dec!(-42.4), Currency::usd());
        assert_eq!(m.to_string(), "-$42.40");

        let m = Money::new(dec!(123456), Currency::new("JPY"));
        assert_eq!(m.to_string(), "123,456");
    }

    #[test]
    fn test_money_from_str() {
        let m = Money::from_str("100.25", Currency::usd()).unwrap();
        assert_eq!(m.value, dec!(100.25));

        assert!(Money::from_str("not-a-number", Currency::usd()).is_err());
    }

    #[test]
    fn test_money_round() {
        let m = Money::new(dec!(92.493525), Currency::usd()).round();
        assert_eq!(m.value, dec!(92.49));
    }
}
