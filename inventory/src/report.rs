//! Console report rendering.
//!
//! Rows are sorted by office, then purchase date, with a blank line between
//! office groups. Assets inside the end-of-life approach window are colored
//! red (< 3 months) or yellow (3-6 months). A summary block follows the
//! table.

use assetbook_common::Money;
use assetbook_fx::Valuation;
use chrono::NaiveDate;
use colored::Colorize;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::asset::{Asset, AssetKind, Lifecycle};

const RULE_WIDTH: usize = 130;

/// One valued, lifecycle-bucketed line of the report.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub asset: Asset,
    pub usd_value: Money,
    pub lifecycle: Lifecycle,
}

/// Aggregate counts for the summary block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub ending_within_three_months: usize,
    pub ending_within_six_months: usize,
    pub computers: usize,
    pub phones: usize,
    /// Per-office counts, sorted by office name.
    pub by_office: Vec<(String, usize)>,
}

impl Summary {
    fn from_rows(rows: &[ReportRow]) -> Self {
        let mut by_office: BTreeMap<String, usize> = BTreeMap::new();
        for row in rows {
            *by_office.entry(row.asset.office.clone()).or_default() += 1;
        }
        Self {
            total: rows.len(),
            ending_within_three_months: rows
                .iter()
                .filter(|r| r.lifecycle == Lifecycle::EndingWithinThreeMonths)
                .count(),
            ending_within_six_months: rows
                .iter()
                .filter(|r| r.lifecycle == Lifecycle::EndingWithinSixMonths)
                .count(),
            computers: rows
                .iter()
                .filter(|r| r.asset.kind == AssetKind::Computer)
                .count(),
            phones: rows
                .iter()
                .filter(|r| r.asset.kind == AssetKind::Phone)
                .count(),
            by_office: by_office.into_iter().collect(),
        }
    }
}

/// A fully valued report, ready to render.
#[derive(Debug, Clone)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub summary: Summary,
}

/// Value and bucket every asset, sorted for display.
pub async fn build_report(assets: &[Asset], valuation: &Valuation, today: NaiveDate) -> Report {
    let mut sorted: Vec<Asset> = assets.to_vec();
    sorted.sort_by(|a, b| {
        a.office
            .cmp(&b.office)
            .then(a.purchase_date.cmp(&b.purchase_date))
    });

    let mut rows = Vec::with_capacity(sorted.len());
    for asset in sorted {
        let usd_value = valuation.to_reporting_currency(&asset.purchase_price).await;
        let lifecycle = asset.lifecycle(today);
        rows.push(ReportRow {
            asset,
            usd_value,
            lifecycle,
        });
    }

    let summary = Summary::from_rows(&rows);
    Report { rows, summary }
}

impl Report {
    /// Render the report as console text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.rows.is_empty() {
            out.push_str("\nNo assets found in inventory.\n");
            return out;
        }

        let rule = "-".repeat(RULE_WIDTH);
        out.push_str("\nAsset Inventory:\n");
        out.push_str(&rule);
        out.push('\n');
        let _ = writeln!(
            out,
            "{:<12} | {:<18} | {:<12} | {:<18} | {:<10} | {:<15} | {:<15} | {:<15}",
            "Type", "Serial Number", "Brand", "Model", "Office", "Purchase Date", "Local Price", "USD Value"
        );
        out.push_str(&rule);
        out.push('\n');

        let mut previous_office: Option<&str> = None;
        for row in &self.rows {
            if previous_office.is_some_and(|office| office != row.asset.office) {
                out.push('\n');
            }
            previous_office = Some(&row.asset.office);

            let line = format!(
                "{:<12} | {:<18} | {:<12} | {:<18} | {:<10} | {:<15} | {:<15} | {:<15}",
                row.asset.kind.label(),
                row.asset.serial_number,
                row.asset.brand,
                row.asset.model,
                row.asset.office,
                row.asset.purchase_date.format("%Y-%m-%d").to_string(),
                row.asset.purchase_price.to_string(),
                row.usd_value.to_string(),
            );
            let line = match row.lifecycle {
                Lifecycle::EndingWithinThreeMonths => line.red().to_string(),
                Lifecycle::EndingWithinSixMonths => line.yellow().to_string(),
                Lifecycle::Healthy => line,
            };
            out.push_str(&line);
            out.push('\n');
            out.push_str(&rule);
            out.push('\n');
        }

        let s = &self.summary;
        let _ = writeln!(out, "Total assets: {}", s.total);
        let _ = writeln!(
            out,
            "Assets nearing end of life (< 3 months): {}",
            s.ending_within_three_months
        );
        let _ = writeln!(
            out,
            "Assets nearing end of life (3-6 months): {}",
            s.ending_within_six_months
        );
        let _ = writeln!(out, "Computers: {}", s.computers);
        let _ = writeln!(out, "Phones: {}", s.phones);

        out.push_str("\nAssets by Office:\n");
        for (office, count) in &s.by_office {
            let _ = writeln!(out, "{office}: {count}");
        }

        out
    }
}
