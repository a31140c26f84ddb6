//! Production log queries (milk collection, weighings).
//!
//! Production records carry litres or kilograms in `amount`; charts are
//! drawn per day as well as per month.

use crate::aggregator::PeriodAggregator;
use crate::calendar::DateRange;
use crate::config::{self, TrailingWindow};
use crate::error::Result;
use crate::filter::RecordFilter;
use crate::models::{DatedRecord, PeriodBucket, RecordSummary};
use crate::queries::validate_record;
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// ProductionQuery
// ---------------------------------------------------------------------------

/// Query interface for the `production` collection.
pub struct ProductionQuery<'a> {
    store: &'a dyn RecordStore,
    aggregator: &'a PeriodAggregator,
}

impl<'a> ProductionQuery<'a> {
    /// Create a new `ProductionQuery` bound to the given store and aggregator.
    pub fn new(store: &'a dyn RecordStore, aggregator: &'a PeriodAggregator) -> Self {
        Self { store, aggregator }
    }

    pub fn all(&self) -> Result<Vec<DatedRecord>> {
        self.store.load(config::PRODUCTION)
    }

    /// Validate and persist a new production entry.
    pub fn add(&self, record: DatedRecord) -> Result<()> {
        validate_record(&record)?;
        self.store.append(config::PRODUCTION, record)
    }

    pub fn list(&self, filter: &RecordFilter) -> Result<Vec<DatedRecord>> {
        let records = self.all()?;
        Ok(self.aggregator.filter_records(&records, filter))
    }

    pub fn summary(&self, filter: &RecordFilter) -> Result<RecordSummary> {
        let filtered = self.list(filter)?;
        Ok(self.aggregator.summarize(&filtered))
    }

    /// Daily output over the trailing `days`, ending at the latest entry.
    pub fn daily_chart(
        &self,
        days: u32,
        active_range: Option<&DateRange>,
    ) -> Result<Vec<PeriodBucket>> {
        let records = self.all()?;
        self.aggregator
            .build_daily_buckets(&records, days, active_range)
    }

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
}
