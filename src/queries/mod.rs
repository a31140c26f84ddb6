//! Dashboard query modules.
//!
//! Each module provides a query struct that borrows a [`RecordStore`](crate::store::RecordStore)
//! and a [`PeriodAggregator`](crate::aggregator::PeriodAggregator), loads a snapshot of one
//! collection per call, and hands it to the aggregator.

pub mod production;
pub mod sales;

pub use production::ProductionQuery;
pub use sales::SalesQuery;

use crate::error::{LedgerError, Result};
use crate::models::DatedRecord;

/// Reject records the aggregator would silently drop or that would poison
/// totals.
pub(crate) fn validate_record(record: &DatedRecord) -> Result<()> {
    if record.date().is_none() {
        return Err(LedgerError::InvalidDate(record.iso_date.clone()));
    }
    if !record.amount.is_finite() || !record.quantity.is_finite() {
        return Err(LedgerError::InvalidArgument(format!(
            "amount and quantity must be finite (amount={}, quantity={})",
            record.amount, record.quantity
        )));
    }
    Ok(())
}
