//! Assetbook Inventory Report
//!
//! Loads the asset catalog, values every purchase price in USD via the
//! ECB daily reference rates, and prints a grouped console report flagging
//! assets nearing their 3-year end of life.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assetbook_fx::{CurrencyService, EcbRateSource, Valuation};

mod asset;
mod catalog;
mod report;

/// Assetbook inventory report CLI
#[derive(Parser, Debug)]
#[command(name = "assetbook")]
#[command(about = "Company asset inventory report with USD valuations")]
struct Args {
    /// Path to the asset catalog XML file
    #[arg(long, default_value = "data/assets.xml")]
    assets: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    println!("Asset Tracking System");
    println!("=====================\n");

    println!("Initializing currency converter...");
    let service = Arc::new(CurrencyService::new(Arc::new(EcbRateSource::new())));

    // Suppress the service's own notice; the friendlier status is printed here.
    let table = service.refresh(true).await;
    if !table.is_fallback() && table.is_valid() {
        println!(
            "Currency rates updated successfully ({} reference rates, as of {}).",
            table.len(),
            table.as_of()
        );
    } else {
        println!("Warning: using fallback currency rates.");
        println!("Using approximate conversion rates:");
        println!("  1 EUR = 1.10 USD");
        println!("  1 EUR = 10.50 SEK");
    }

    let assets = match catalog::load_catalog(&args.assets) {
        Ok(assets) => assets,
        Err(err) => {
            error!(path = %args.assets.display(), error = %err, "Failed to load asset catalog");
            Vec::new()
        }
    };

    let valuation = Valuation::new(service);
    let today = Utc::now().date_naive();
    let report = report::build_report(&assets, &valuation, today).await;
    print!("{}", report.render());

    // Degraded rates are never fatal; the worst outcome is an approximate
    // valuation.
    Ok(())
}
