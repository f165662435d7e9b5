//! Assetbook FX Engine
//!
//! Currency normalization for asset valuations. Fetches the ECB daily
//! reference-rate table once per process, caches it, and converts amounts
//! between currencies via EUR as the pivot. Every failure degrades to a
//! deterministic fallback instead of an error: a failed fetch yields a
//! hard-coded rate table, and a failed lookup is recovered by the
//! valuation façade with approximate constant rates.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use assetbook_common::{Currency, Money};
//! use assetbook_fx::{CurrencyService, EcbRateSource, Valuation};
//!
//! let service = Arc::new(CurrencyService::new(Arc::new(EcbRateSource::new())));
//! let table = service.refresh(false).await;
//! println!("rates as of {}", table.as_of());
//!
//! let valuation = Valuation::new(service);
//! let price = Money::from_str("9990.00", Currency::sek())?;
//! let usd = valuation.to_reporting_currency(&price).await;
//! ```

pub mod ecb;
pub mod error;
pub mod service;
pub mod source;
pub mod table;
pub mod valuation;

pub use error::{FxError, FxResult};
pub use service::CurrencyService;
pub use source::{fallback_table, EcbRateSource, RateSource, ECB_DAILY_URL};
pub use table::{Provenance, RateTable};
pub use valuation::Valuation;

#[cfg(any(test, feature = "test-utils"))]
pub use source::StaticRateSource;
