//! Dated snapshots of EUR-relative exchange rates.

use assetbook_common::Currency;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Where a rate table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Fetched from the live rate feed.
    Live,
    /// Hard-coded substitute used when the live fetch failed.
    Fallback,
}

/// An immutable snapshot of exchange rates for a given date.
///
/// Every rate is expressed as units of that currency per 1 EUR. EUR itself
/// is never stored: it is the implicit pivot and always resolves to 1.0.
/// Tables are replaced wholesale on refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    as_of: NaiveDate,
    rates: BTreeMap<Currency, Decimal>,
    provenance: Provenance,
}

impl RateTable {
    /// Create a new table. An explicit EUR entry, if present, is dropped;
    /// the pivot's identity rate is implied.
    pub fn new(
        as_of: NaiveDate,
        mut rates: BTreeMap<Currency, Decimal>,
        provenance: Provenance,
    ) -> Self {
        rates.remove(&Currency::eur());
        Self {
            as_of,
            rates,
            provenance,
        }
    }

    /// Units of `currency` per 1 EUR, or `None` for an unknown code.
    /// EUR always resolves to 1.0.
    pub fn lookup(&self, currency: &Currency) -> Option<Decimal> {
        if *currency == Currency::eur() {
            return Some(Decimal::ONE);
        }
        self.rates.get(currency).copied()
    }

    /// A table is valid iff it covers the currencies the reporting pipeline
    /// depends on: USD and SEK (EUR is implicit). Validity is coverage, not
    /// provenance, so a thin live table is invalid and the standard fallback
    /// table is valid.
    pub fn is_valid(&self) -> bool {
        self.rates.contains_key(&Currency::usd()) && self.rates.contains_key(&Currency::sek())
    }

    /// The reference date of this snapshot.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Where this table came from.
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// True when this table is the hard-coded fallback.
    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }

    /// Number of stored rates (EUR excluded).
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when no rates are stored.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Stored currency codes in sorted order.
    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.rates.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()
    }

    fn table(entries: &[(&str, Decimal)], provenance: Provenance) -> RateTable {
        let rates = entries
            .iter()
            .map(|(code, rate)| (Currency::new(*code), *rate))
            .collect();
        RateTable::new(date(), rates, provenance)
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let table = table(&[("USD", dec!(1.0812)), ("SEK", dec!(11.235))], Provenance::Live);

        assert_eq!(table.lookup(&Currency::usd()), Some(dec!(1.0812)));
        assert_eq!(table.lookup(&Currency::sek()), Some(dec!(11.235)));
        assert_eq!(table.lookup(&Currency::new("XYZ")), None);
    }

    #[test]
    fn test_eur_is_implicit_identity() {
        let table = table(&[("USD", dec!(1.1)), ("EUR", dec!(2.0))], Provenance::Live);

        // The explicit EUR entry is dropped, the identity rate stands.
        assert_eq!(table.lookup(&Currency::eur()), Some(Decimal::ONE));
        assert_eq!(table.len(), 1);
        assert!(!table.currencies().any(|c| *c == Currency::eur()));
    }

    #[test]
    fn test_validity_is_coverage_not_provenance() {
        let thin_live = table(&[("USD", dec!(1.1))], Provenance::Live);
        assert!(!thin_live.is_valid());

        let covered_fallback =
            table(&[("USD", dec!(1.1)), ("SEK", dec!(10.5))], Provenance::Fallback);
        assert!(covered_fallback.is_valid());
        assert!(covered_fallback.is_fallback());
    }

    #[test]
    fn test_empty_table() {
        let table = table(&[], Provenance::Live);
        assert!(table.is_empty());
        assert!(!table.is_valid());
        assert_eq!(table.lookup(&Currency::eur()), Some(Decimal::ONE));
    }
}
