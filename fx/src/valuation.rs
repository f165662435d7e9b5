//! Reporting-currency valuation façade.

use std::sync::Arc;

use assetbook_common::{Currency, Money};
use rust_decimal::Decimal;
use tracing::warn;

use crate::service::CurrencyService;

/// Converts asset prices into the reporting currency (USD).
///
/// This is the surface the inventory layer talks to. On top of the table
/// fallback inside the rate source it carries a second, distinct constant
/// fallback: even a table that happens to lack one specific code must not
/// abort a report, it degrades to an approximate value instead.
pub struct Valuation {
    service: Arc<CurrencyService>,
}

impl Valuation {
    /// The fixed currency all valuations are normalized to.
    pub fn reporting_currency() -> Currency {
        Currency::usd()
    }

    /// Create a façade over the given service.
    pub fn new(service: Arc<CurrencyService>) -> Self {
        Self { service }
    }

    /// Value `money` in the reporting currency, rounded to its standard
    /// decimal places. A USD amount is passed through untouched, with no
    /// fetch. A failed conversion falls back to approximate constant rates
    /// (EUR 1.1, SEK 0.095, identity otherwise) with a one-line notice.
    pub async fn to_reporting_currency(&self, money: &Money) -> Money {
        let usd = Self::reporting_currency();
        if money.currency == usd {
            return money.clone();
        }

        match self
            .service
            .convert(money.value, &money.currency, &usd)
            .await
        {
            Ok(value) => Money::new(value, usd).round(),
            Err(error) => {
                warn!(
                    currency = %money.currency,
                    %error,
                    "Conversion to USD failed, using approximate rate"
                );
                let rate = match money.currency.code() {
                    "EUR" => Decimal::new(11, 1),  // 1.1
                    "SEK" => Decimal::new(95, 3),  // 0.095
                    _ => Decimal::ONE,
                };
                Money::new(money.value * rate, usd).round()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticRateSource;
    use crate::table::{Provenance, RateTable};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn valuation_with(entries: &[(&str, Decimal)]) -> (Valuation, Arc<StaticRateSource>) {
        let rates: BTreeMap<Currency, Decimal> = entries
            .iter()
            .map(|(code, rate)| (Currency::new(*code), *rate))
            .collect();
        let table = RateTable::new(
            NaiveDate::from_ymd_opt(2026, 8, 21).unwrap(),
            rates,
            Provenance::Live,
        );
        let source = Arc::new(StaticRateSource::new(table));
        let service = Arc::new(CurrencyService::new(source.clone()));
        (Valuation::new(service), source)
    }

    #[tokio::test]
    async fn test_usd_passthrough_performs_no_fetch() {
        let (valuation, source) = valuation_with(&[]);
        let price = Money::new(dec!(1499.994), Currency::usd());

        let valued = valuation.to_reporting_currency(&price).await;

        assert_eq!(valued, price);
        assert_eq!(source.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_live_rate_preferred() {
        let (valuation, _) = valuation_with(&[("USD", dec!(1.0812)), ("SEK", dec!(11.235))]);
        let price = Money::new(dec!(100), Currency::eur());

        let valued = valuation.to_reporting_currency(&price).await;

        assert_eq!(valued.currency, Currency::usd());
        assert_eq!(valued.value, dec!(108.12));
    }

    #[tokio::test]
    async fn test_eur_constant_fallback() {
        // Thin table without USD: conversion fails, the constant tier applies.
        let (valuation, _) = valuation_with(&[("SEK", dec!(11.235))]);
        let price = Money::new(dec!(100), Currency::eur());

        let valued = valuation.to_reporting_currency(&price).await;

        assert_eq!(valued.value, dec!(110.00));
    }

    #[tokio::test]
    async fn test_sek_constant_fallback() {
        let (valuation, _) = valuation_with(&[]);
        let price = Money::new(dec!(1000), Currency::sek());

        let valued = valuation.to_reporting_currency(&price).await;

        assert_eq!(valued.value, dec!(95.00));
    }

    #[tokio::test]
    async fn test_unknown_currency_identity_fallback() {
        let (valuation, _) = valuation_with(&[]);
        let price = Money::new(dec!(250.50), Currency::new("CHF"));

        let valued = valuation.to_reporting_currency(&price).await;

        assert_eq!(valued.currency, Currency::usd());
        assert_eq!(valued.value, dec!(250.50));
    }

    #[tokio::test]
    async fn test_result_rounded_for_display() {
        let (valuation, _) = valuation_with(&[("USD", dec!(1.0812)), ("SEK", dec!(11.235))]);
        let price = Money::new(dec!(100), Currency::usd());
        // 100 USD via identity stays exact; SEK involves division.
        let sek_price = Money::new(dec!(1000), Currency::sek());

        let valued = valuation.to_reporting_currency(&sek_price).await;

        assert_eq!(valued.value, (dec!(1000) / dec!(11.235) * dec!(1.0812)).round_dp(2));
        assert_eq!(
            valuation.to_reporting_currency(&price).await.value,
            dec!(100)
        );
    }
}
