//! Record filter construction.
//!
//! A [`RecordFilter`] combines an optional inclusive date range with zero or
//! more facet equality conditions. Builder methods consume and return `Self`
//! for chaining.
//!
//! # Example
//!
//! ```rust
//! use farm_ledger::{DateRange, Facet, RecordFilter};
//! let filter = RecordFilter::new()
//!     .date_range(DateRange::parse("2023-03-01", "2023-03-31").unwrap())
//!     .where_eq(Facet::Product, "Novillo")
//!     .where_eq(Facet::Status, "Todos");
//! assert_eq!(filter.facet(Facet::Product), Some("Novillo"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::config::AggregatorConfig;
use crate::error::{LedgerError, Result};
use crate::models::DatedRecord;

// ---------------------------------------------------------------------------
// Facet
// ---------------------------------------------------------------------------

/// A categorical filter dimension on a [`DatedRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Product,
    Client,
    Status,
}

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Product => "product",
            Facet::Client => "client",
            Facet::Status => "status",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "product" => Ok(Facet::Product),
            "client" => Ok(Facet::Client),
            "status" => Ok(Facet::Status),
            other => Err(LedgerError::InvalidArgument(format!(
                "unknown facet: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecordFilter
// ---------------------------------------------------------------------------

/// Date range plus facet equality conditions.
///
/// With no date range set, the aggregator applies "earliest possible date up
/// to today".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    date_range: Option<DateRange>,
    facets: BTreeMap<Facet, String>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to an inclusive date range.
    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Require `facet` to equal `value`. A wildcard value such as `"Todos"`
    /// is kept but matches everything.
    pub fn where_eq(mut self, facet: Facet, value: impl Into<String>) -> Self {
        self.facets.insert(facet, value.into());
        self
    }

    /// Drop every facet condition, keeping the date range.
    pub fn clear_facets(mut self) -> Self {
        self.facets.clear();
        self
    }

    pub fn range(&self) -> Option<DateRange> {
        self.date_range
    }

    pub fn facet(&self, facet: Facet) -> Option<&str> {
        self.facets.get(&facet).map(String::as_str)
    }

    pub fn facets(&self) -> impl Iterator<Item = (Facet, &str)> {
        self.facets.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// True when at least one facet condition narrows the result.
    pub fn has_active_facets(&self, config: &AggregatorConfig) -> bool {
        self.facets.values().any(|v| !config.is_wildcard(v))
    }

    /// Check every non-wildcard facet against the record. A record lacking
    /// the field never matches a concrete value.
    pub fn matches_facets(&self, record: &DatedRecord, config: &AggregatorConfig) -> bool {
        self.facets.iter().all(|(facet, wanted)| {
            config.is_wildcard(wanted) || record.facet(*facet) == Some(wanted.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_parse_is_case_insensitive() {
        assert_eq!(Facet::parse("Product").unwrap(), Facet::Product);
        assert_eq!(Facet::parse("CLIENT").unwrap(), Facet::Client);
        assert!(Facet::parse("breed").is_err());
    }

    #[test]
    fn wildcard_matches_record_without_field() {
        let cfg = AggregatorConfig::default();
        let record = DatedRecord::new("2023-03-10", 1.0);
        let filter = RecordFilter::new().where_eq(Facet::Product, "Todos");
        assert!(filter.matches_facets(&record, &cfg));
        assert!(!filter.has_active_facets(&cfg));
    }

    #[test]
    fn concrete_value_needs_exact_match() {
        let cfg = AggregatorConfig::default();
        let record = DatedRecord::new("2023-03-10", 1.0).with_client("Frigorifico Sur");
        let hit = RecordFilter::new().where_eq(Facet::Client, "Frigorifico Sur");
        let miss = RecordFilter::new().where_eq(Facet::Client, "frigorifico sur");
        let absent = RecordFilter::new().where_eq(Facet::Product, "Leche");
        assert!(hit.matches_facets(&record, &cfg));
        assert!(!miss.matches_facets(&record, &cfg));
        assert!(!absent.matches_facets(&record, &cfg));
    }

    #[test]
    fn clear_facets_keeps_range() {
        let range = DateRange::parse("2023-01-01", "2023-01-31").unwrap();
        let filter = RecordFilter::new()
            .date_range(range)
            .where_eq(Facet::Status, "Pagado")
            .clear_facets();
        assert_eq!(filter.range(), Some(range));
        assert_eq!(filter.facets().count(), 0);
    }
}
