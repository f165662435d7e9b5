//! FX engine error types.

use assetbook_common::Currency;
use thiserror::Error;

/// Errors that can occur in the FX engine.
///
/// `Http`, `Xml` and `Document` never escape [`crate::source::EcbRateSource`],
/// which collapses them into the fallback table. `RateUnavailable` is the
/// reportable outcome of a conversion against a table that lacks a code.
#[derive(Debug, Error)]
pub enum FxError {
    /// Rate feed request failed (unreachable, non-2xx status or timeout).
    #[error("Rate feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate feed is not well-formed XML.
    #[error("Rate feed is not well-formed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Rate document parsed but did not have the expected structure.
    #[error("Unexpected rate document: {0}")]
    Document(String),

    /// No exchange rate available for the requested currency.
    #[error("No exchange rate available for {0}")]
    RateUnavailable(Currency),
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
