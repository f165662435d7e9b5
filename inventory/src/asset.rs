//! The asset model: what the company owns and how close it is to
//! replacement.

use assetbook_common::Money;
use chrono::{Months, NaiveDate};
use std::fmt;

/// Assets reach end of life three years after purchase.
const END_OF_LIFE_MONTHS: u32 = 36;

/// The closed set of tracked asset kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Computer,
    Phone,
}

impl AssetKind {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Computer => "Computer",
            AssetKind::Phone => "Phone",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How close an asset is to its end of life, relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Less than 3 months remaining.
    EndingWithinThreeMonths,
    /// Between 3 and 6 months remaining.
    EndingWithinSixMonths,
    /// Everything else, already-expired assets included: only the approach
    /// window is flagged.
    Healthy,
}

/// A company-owned computing asset.
#[derive(Debug, Clone)]
pub struct Asset {
    pub kind: AssetKind,
    pub serial_number: String,
    pub brand: String,
    pub model: String,
    pub office: String,
    pub purchase_date: NaiveDate,
    pub purchase_price: Money,
}

impl Asset {
    /// The date this asset reaches end of life.
    pub fn end_of_life(&self) -> NaiveDate {
        self.purchase_date + Months::new(END_OF_LIFE_MONTHS)
    }

    /// Lifecycle bucket relative to `today`.
    pub fn lifecycle(&self, today: NaiveDate) -> Lifecycle {
        let days_left = (self.end_of_life() - today).num_days();
        if days_left > 0 && days_left < 90 {
            Lifecycle::EndingWithinThreeMonths
        } else if (90..180).contains(&days_left) {
            Lifecycle::EndingWithinSixMonths
        } else {
            Lifecycle::Healthy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetbook_common::Currency;
    use rust_decimal_macros::dec;

    fn asset_purchased(date: &str) -> Asset {
        Asset {
            kind: AssetKind::Computer,
            serial_number: "SN-1".into(),
            brand: "Lenovo".into(),
            model: "ThinkPad X1".into(),
            office: "Oslo".into(),
            purchase_date: date.parse().unwrap(),
            purchase_price: Money::new(dec!(1500), Currency::usd()),
        }
    }

    fn day(date: &str) -> NaiveDate {
        date.parse().unwrap()
    }

    #[test]
    fn test_end_of_life_is_three_years_out() {
        let asset = asset_purchased("2024-02-29");
        // Leap day clamps to the end of the month.
        assert_eq!(asset.end_of_life(), day("2027-02-28"));

        let asset = asset_purchased("2023-08-15");
        assert_eq!(asset.end_of_life(), day("2026-08-15"));
    }

    #[test]
    fn test_lifecycle_boundaries() {
        // EOL on 2026-08-15.
        let asset = asset_purchased("2023-08-15");

        // 1 and 89 days remaining: red window.
        assert_eq!(
            asset.lifecycle(day("2026-08-14")),
            Lifecycle::EndingWithinThreeMonths
        );
        assert_eq!(
            asset.lifecycle(day("2026-05-18")),
            Lifecycle::EndingWithinThreeMonths
        );

        // 90 and 179 days remaining: yellow window.
        assert_eq!(
            asset.lifecycle(day("2026-05-17")),
            Lifecycle::EndingWithinSixMonths
        );
        assert_eq!(
            asset.lifecycle(day("2026-02-17")),
            Lifecycle::EndingWithinSixMonths
        );

        // 180 days remaining: not yet flagged.
        assert_eq!(asset.lifecycle(day("2026-02-16")), Lifecycle::Healthy);
    }

    #[test]
    fn test_expired_assets_are_not_flagged() {
        let asset = asset_purchased("2020-01-01");
        assert_eq!(asset.lifecycle(day("2026-08-21")), Lifecycle::Healthy);

        // Exactly on the end-of-life day.
        let asset = asset_purchased("2023-08-21");
        assert_eq!(asset.lifecycle(day("2026-08-21")), Lifecycle::Healthy);
    }
}
