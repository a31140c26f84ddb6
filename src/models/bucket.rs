use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;

// ---------------------------------------------------------------------------
// PeriodBucket — One bar of a dashboard chart
// ---------------------------------------------------------------------------

/// A derived aggregation unit covering one calendar month (or one day for
/// daily charts). Never persisted; rebuilt on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    pub label: String,
    pub year: i32,
    /// 0-based month.
    pub month_index: u32,
    /// Day of month for daily buckets, `None` for monthly ones.
    pub day: Option<u32>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total: f64,
    pub is_active: bool,
    pub height_ratio: f64,
}

impl PeriodBucket {
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }

    pub fn is_daily(&self) -> bool {
        self.day.is_some()
    }
}
