//! Parser for the ECB daily reference-rate document.
//!
//! The feed is a small XML envelope with triple-nested `Cube` elements:
//!
//! ```xml
//! <gesmes:Envelope ...>
//!   <Cube>
//!     <Cube time="2026-08-21">
//!       <Cube currency="USD" rate="1.0812"/>
//!       <Cube currency="SEK" rate="11.235"/>
//!     </Cube>
//!   </Cube>
//! </gesmes:Envelope>
//! ```
//!
//! The outer `Cube` is a bare container, the dated middle `Cube` carries the
//! reference date, and each leaf `Cube` carries one currency's EUR-relative
//! rate. All codes present are retained. A DOCTYPE declaration is skipped as
//! an inert event and its external reference is never resolved.

use std::collections::BTreeMap;

use assetbook_common::Currency;
use chrono::NaiveDate;
use quick_xml::events::Event;
use quick_xml::Reader;
use rust_decimal::Decimal;

use crate::error::{FxError, FxResult};
use crate::table::{Provenance, RateTable};

/// Parse the daily feed into a live [`RateTable`].
///
/// A document without a dated `Cube`, without any leaf rates, or with an
/// unparseable or non-positive rate is rejected with [`FxError::Document`].
/// Rates are divisors during conversion, so zero and negative values must
/// never reach a table.
pub fn parse_daily_feed(xml: &str) -> FxResult<RateTable> {
    let mut reader = Reader::from_str(xml);
    let mut as_of: Option<NaiveDate> = None;
    let mut rates: BTreeMap<Currency, Decimal> = BTreeMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Cube" => {
                let mut currency: Option<String> = None;
                let mut rate: Option<String> = None;

                for attr in e.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    match attr.key.local_name().as_ref() {
                        b"time" => {
                            let text = attr.unescape_value()?;
                            let date = NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                                .map_err(|err| {
                                    FxError::Document(format!(
                                        "unparseable reference date {text:?}: {err}"
                                    ))
                                })?;
                            as_of = Some(date);
                        }
                        b"currency" => currency = Some(attr.unescape_value()?.into_owned()),
                        b"rate" => rate = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }

                if let (Some(code), Some(rate)) = (currency, rate) {
                    let parsed: Decimal = rate.parse().map_err(|err| {
                        FxError::Document(format!("unparseable rate {rate:?} for {code}: {err}"))
                    })?;
                    if parsed <= Decimal::ZERO {
                        return Err(FxError::Document(format!(
                            "non-positive rate {parsed} for {code}"
                        )));
                    }
                    rates.insert(Currency::new(code), parsed);
                }
            }
            // DocType and every other event carry no rate data; in particular
            // the DTD reference is skipped without being dereferenced.
            Event::Eof => break,
            _ => {}
        }
    }

    let as_of = as_of.ok_or_else(|| FxError::Document("missing dated Cube element".into()))?;
    if rates.is_empty() {
        return Err(FxError::Document("document contains no exchange rates".into()));
    }

    Ok(RateTable::new(as_of, rates, Provenance::Live))
}
