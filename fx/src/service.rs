//! Process-wide cached currency conversion.

use std::sync::Arc;

use assetbook_common::Currency;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::error::{FxError, FxResult};
use crate::source::RateSource;
use crate::table::RateTable;

/// Holds the most recently obtained [`RateTable`] and converts amounts
/// between currencies via EUR as the pivot.
///
/// The table is absent at construction and populated by the first `convert`
/// or an explicit `refresh`; it is then kept for the process lifetime (no
/// TTL) and only ever replaced wholesale. The lazy-init path is serialized
/// by a fetch guard so concurrent first conversions trigger exactly one
/// source fetch.
pub struct CurrencyService {
    source: Arc<dyn RateSource>,
    table: RwLock<Option<RateTable>>,
    fetch_guard: Mutex<()>,
}

impl CurrencyService {
    /// Create a service with no cached table.
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self {
            source,
            table: RwLock::new(None),
            fetch_guard: Mutex::new(()),
        }
    }

    /// Convert `amount` from one currency to another through the EUR pivot.
    ///
    /// An unknown code is a reportable [`FxError::RateUnavailable`], never a
    /// panic. Identity conversions succeed regardless of table contents. No
    /// rounding is applied; callers round for display.
    pub async fn convert(
        &self,
        amount: Decimal,
        from: &Currency,
        to: &Currency,
    ) -> FxResult<Decimal> {
        let table = self.current_or_fetch().await;

        if from == to {
            return Ok(amount);
        }

        // Rates are units-per-EUR, so dividing the source amount by its rate
        // yields EUR; EUR itself resolves to the identity rate.
        let from_rate = table
            .lookup(from)
            .ok_or_else(|| FxError::RateUnavailable(from.clone()))?;
        let in_eur = amount / from_rate;

        let to_rate = table
            .lookup(to)
            .ok_or_else(|| FxError::RateUnavailable(to.clone()))?;
        Ok(in_eur * to_rate)
    }

    /// Force a fetch and replace the cached table unconditionally, fallback
    /// included: a failed refresh still overwrites stale data so downstream
    /// code always sees the current best knowledge. Returns the new table so
    /// the caller can branch on its validity for user-facing messaging.
    pub async fn refresh(&self, suppress_notice: bool) -> RateTable {
        let table = self.source.fetch().await;
        *self.table.write().await = Some(table.clone());

        debug!(
            source = self.source.name(),
            as_of = %table.as_of(),
            entries = table.len(),
            fallback = table.is_fallback(),
            "Rate table refreshed"
        );
        if table.is_fallback() && !suppress_notice {
            warn!(
                as_of = %table.as_of(),
                "Live rate fetch failed, using approximate fallback rates"
            );
        }

        table
    }

    /// Whether the cached table covers the required reporting currencies.
    /// An absent table is invalid. Never triggers a fetch.
    pub async fn has_valid_rates(&self) -> bool {
        self.table
            .read()
            .await
            .as_ref()
            .map_or(false, RateTable::is_valid)
    }

    /// A copy of the cached table, if any. Never triggers a fetch.
    pub async fn snapshot(&self) -> Option<RateTable> {
        self.table.read().await.clone()
    }

    /// Return the cached table, fetching it first if none is cached yet.
    /// Double-checked under the fetch guard: at most one fetch per process
    /// even under concurrent first calls.
    async fn current_or_fetch(&self) -> RateTable {
        if let Some(table) = self.table.read().await.clone() {
            return table;
        }

        let _guard = self.fetch_guard.lock().await;
        if let Some(table) = self.table.read().await.clone() {
            return table;
        }

        let table = self.source.fetch().await;
        *self.table.write().await = Some(table.clone());
        table
    }
}
