//! Farm ledger aggregation for Rust.
//!
//! Turns dated sale and production records into the month- and day-bucketed
//! series behind livestock-farm dashboards, and filters them by inclusive
//! date range and categorical facets (product, client, payment status).
//! Records live in a pluggable [`RecordStore`]; aggregation itself is a pure
//! projection over a snapshot.
//!
//! # Quick start
//!
//! ```no_run
//! use farm_ledger::{DatedRecord, FarmLedger, RecordFilter, TrailingWindow};
//!
//! let ledger = FarmLedger::builder().in_memory().build().unwrap();
//!
//! ledger
//!     .sales()
//!     .add(DatedRecord::new("2023-03-10", 950_000.0).with_product("Novillo"))
//!     .unwrap();
//!
//! // Six-month revenue chart, anchored at the latest sale
//! let buckets = ledger.sales().monthly_chart(TrailingWindow::SixMonths, None).unwrap();
//!
//! // Drill into the last month
//! let filter = ledger.aggregator().select_bucket(&buckets[5]);
//! let summary = ledger.sales().summary(&filter).unwrap();
//! ```

pub mod aggregator;
pub mod calendar;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod queries;
pub mod store;

pub use aggregator::PeriodAggregator;
pub use calendar::DateRange;
pub use config::{AggregatorConfig, LabelLocale, TrailingWindow};
pub use error::{LedgerError, Result};
pub use filter::{Facet, RecordFilter};
pub use models::{DatedRecord, PeriodBucket, RecordSummary};
pub use store::{JsonFileStore, MemoryStore, RecordStore};

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

// ---------------------------------------------------------------------------
// FarmLedgerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`FarmLedger`] instance.
///
/// Use [`FarmLedger::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](FarmLedgerBuilder::build) to create the ledger.
#[derive(Default)]
pub struct FarmLedgerBuilder {
    data_dir: Option<PathBuf>,
    in_memory: bool,
    store: Option<Box<dyn RecordStore>>,
    config: AggregatorConfig,
    today: Option<NaiveDate>,
}

impl FarmLedgerBuilder {
    /// Set a custom data directory for the JSON file store.
    ///
    /// If not set, the platform-appropriate data directory is used
    /// (e.g. `~/.local/share/farm-ledger` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep records in memory only; nothing touches the filesystem.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Use a caller-supplied store. Takes precedence over
    /// [`data_dir`](Self::data_dir) and [`in_memory`](Self::in_memory).
    pub fn store(mut self, store: Box<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override aggregation tunables (height floors, wildcards, labels).
    pub fn config(mut self, config: AggregatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Pin "today" instead of reading the local clock.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Build the ledger, validating the config and opening the store.
    pub fn build(self) -> Result<FarmLedger> {
        self.config.validate()?;

        let store: Box<dyn RecordStore> = match self.store {
            Some(store) => store,
            None if self.in_memory => Box::new(MemoryStore::new()),
            None => Box::new(JsonFileStore::new(self.data_dir)?),
        };

        let mut aggregator = PeriodAggregator::new(self.config);
        if let Some(today) = self.today {
            aggregator = aggregator.with_today(today);
        }

        info!(store = %store.describe(), "opened farm ledger");
        Ok(FarmLedger { store, aggregator })
    }
}

// ---------------------------------------------------------------------------
// FarmLedger
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Owns a [`RecordStore`] and a [`PeriodAggregator`] and exposes the
/// dashboards as lightweight borrowing wrappers.
///
/// Created via [`FarmLedger::builder()`].
pub struct FarmLedger {
    store: Box<dyn RecordStore>,
    aggregator: PeriodAggregator,
}

impl FarmLedger {
    /// Create a new builder for configuring the ledger.
    pub fn builder() -> FarmLedgerBuilder {
        FarmLedgerBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the sales query interface.
    pub fn sales(&self) -> queries::SalesQuery<'_> {
        queries::SalesQuery::new(self.store.as_ref(), &self.aggregator)
    }

    /// Access the production log query interface.
    pub fn production(&self) -> queries::ProductionQuery<'_> {
        queries::ProductionQuery::new(self.store.as_ref(), &self.aggregator)
    }

    // -- Accessors ---------------------------------------------------------

    pub fn aggregator(&self) -> &PeriodAggregator {
        &self.aggregator
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for FarmLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = self.aggregator.config();
        write!(
            f,
            "FarmLedger(store={}, monthly_floor={}, locale={:?})",
            self.store.describe(),
            cfg.monthly_height_floor,
            cfg.locale
        )
    }
}
