//! Assetbook Common Types
//!
//! Shared monetary types used by the FX engine and the inventory layer:
//! currency codes with display knowledge, and decimal money values.

pub mod monetary;

pub use monetary::{AmountParseError, Currency, Money};
