//! Sales ledger queries: the sales dashboard's chart, table and KPI cards.
//!
//! Sale records carry the currency total in `amount`, kilograms sold in
//! `quantity`, and the product, client and payment status facets.

use crate::aggregator::PeriodAggregator;
use crate::calendar::DateRange;
use crate::config::{self, TrailingWindow};
use crate::error::Result;
use crate::filter::{Facet, RecordFilter};
use crate::models::{DatedRecord, PeriodBucket, RecordSummary};
use crate::queries::validate_record;
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// SalesQuery
// ---------------------------------------------------------------------------

/// Query interface for the `sales` collection.
pub struct SalesQuery<'a> {
    store: &'a dyn RecordStore,
    aggregator: &'a PeriodAggregator,
}

impl<'a> SalesQuery<'a> {
    /// Create a new `SalesQuery` bound to the given store and aggregator.
    pub fn new(store: &'a dyn RecordStore, aggregator: &'a PeriodAggregator) -> Self {
        Self { store, aggregator }
    }

    /// Every sale, in insertion order.
    pub fn all(&self) -> Result<Vec<DatedRecord>> {
        self.store.load(config::SALES)
    }

    /// Validate and persist a new sale.
    pub fn add(&self, record: DatedRecord) -> Result<()> {
        validate_record(&record)?;
        self.store.append(config::SALES, record)
    }

    /// Sales matching `filter`, in insertion order.
    pub fn list(&self, filter: &RecordFilter) -> Result<Vec<DatedRecord>> {
        let records = self.all()?;
        Ok(self.aggregator.filter_records(&records, filter))
    }

    /// Revenue and kilograms over the sales matching `filter`.
    pub fn summary(&self, filter: &RecordFilter) -> Result<RecordSummary> {
        let filtered = self.list(filter)?;
        Ok(self.aggregator.summarize(&filtered))
    }

    /// Monthly revenue chart over the trailing `window`.
    ///
    /// `active_range` is the range currently applied to the table; the
    /// bucket it falls in is flagged active.
    pub fn monthly_chart(
        &self,
        window: TrailingWindow,
        active_range: Option<&DateRange>,
    ) -> Result<Vec<PeriodBucket>> {
        let records = self.all()?;
        Ok(self
            .aggregator
            .build_monthly_buckets(&records, window, active_range))
    }

    /// Dropdown options for a facet, led by the wildcard.
    pub fn facet_values(&self, facet: Facet) -> Result<Vec<String>> {
        let records = self.all()?;
        Ok(self.aggregator.facet_values(&records, facet))
    }
}
