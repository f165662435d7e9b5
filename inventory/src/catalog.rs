//! Asset catalog loading from XML.
//!
//! The catalog file looks like:
//!
//! ```xml
//! <Assets>
//!   <Asset Type="Computer">
//!     <SerialNumber>LT-2023-001</SerialNumber>
//!     <Brand>Lenovo</Brand>
//!     <Model>ThinkPad X1</Model>
//!     <PurchaseDate>2023-08-15</PurchaseDate>
//!     <Price>1499.00</Price>
//!     <Currency>USD</Currency>
//!     <OfficeLocation>Oslo</OfficeLocation>
//!   </Asset>
//! </Assets>
//! ```
//!
//! Loading is tolerant per asset: an entry with an unknown type, a missing
//! required field, a bad date or a bad price is logged and skipped while the
//! rest of the file still loads. File-level problems (missing file,
//! malformed XML) are a [`CatalogError`] the caller may downgrade to an
//! empty inventory.

use std::collections::BTreeMap;
use std::path::Path;

use assetbook_common::{Currency, Money};
use chrono::NaiveDate;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::asset::{Asset, AssetKind};

/// File-level catalog failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("Cannot read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog is not well-formed XML.
    #[error("Catalog is not well-formed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Catalog parsed but did not have the expected structure.
    #[error("Unexpected catalog document: {0}")]
    Document(String),
}

/// Load all parseable assets from the catalog file at `path`.
pub fn load_catalog(path: &Path) -> Result<Vec<Asset>, CatalogError> {
    let xml = std::fs::read_to_string(path)?;
    parse_catalog(&xml)
}

/// Parse a catalog document, skipping entries that fail to parse.
pub fn parse_catalog(xml: &str) -> Result<Vec<Asset>, CatalogError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut assets = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"Assets" => seen_root = true,
            Event::Start(e) if e.local_name().as_ref() == b"Asset" => {
                match read_asset(&mut reader, &e)? {
                    Ok(asset) => assets.push(asset),
                    Err(reason) => warn!(%reason, "Skipping catalog entry"),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(CatalogError::Document("missing <Assets> root element".into()));
    }
    Ok(assets)
}

/// Consume one `<Asset>` element. The outer `Result` is a file-level XML
/// failure; the inner one is a per-entry rejection reason.
fn read_asset<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'a>,
) -> Result<Result<Asset, String>, CatalogError> {
    let mut kind_attr: Option<String> = None;
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == b"Type" {
            kind_attr = Some(attr.unescape_value()?.into_owned());
        }
    }

    let mut fields: BTreeMap<String, String> = BTreeMap::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                let text = reader.read_text(e.name())?.trim().to_string();
                fields.insert(name, text);
            }
            Event::End(e) if e.local_name().as_ref() == b"Asset" => break,
            Event::Eof => {
                return Err(CatalogError::Document("unterminated <Asset> element".into()))
            }
            _ => {}
        }
    }

    Ok(build_asset(kind_attr, &fields))
}

fn build_asset(
    kind_attr: Option<String>,
    fields: &BTreeMap<String, String>,
) -> Result<Asset, String> {
    let kind = match kind_attr.as_deref() {
        Some("Computer") => AssetKind::Computer,
        Some("Phone") => AssetKind::Phone,
        Some(other) => return Err(format!("unknown asset type {other:?}")),
        None => return Err("missing Type attribute".into()),
    };

    let field = |name: &str| -> Result<String, String> {
        fields
            .get(name)
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or_else(|| format!("missing {name}"))
    };

    let serial_number = field("SerialNumber")?;
    let brand = field("Brand")?;
    let model = field("Model")?;
    let office = field("OfficeLocation")?;

    let date_text = field("PurchaseDate")?;
    let purchase_date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d")
        .map_err(|err| format!("bad purchase date {date_text:?}: {err}"))?;

    let price_text = field("Price")?;
    let value: Decimal = price_text
        .parse()
        .map_err(|err| format!("bad price {price_text:?}: {err}"))?;

    let code = field("Currency")?;
    let currency = match code.to_uppercase().as_str() {
        "USD" | "EUR" | "SEK" => Currency::new(code),
        other => {
            warn!(code = other, serial = %serial_number, "Unknown currency code, defaulting to USD");
            Currency::usd()
        }
    };

    Ok(Asset {
        kind,
        serial_number,
        brand,
        model,
        office,
        purchase_date,
        purchase_price: Money::new(value, currency),
    })
}
