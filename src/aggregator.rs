//! Date-bucketed aggregation behind the sales and production dashboards.
//!
//! [`PeriodAggregator`] is a pure projection over a snapshot of records: it
//! never reads or writes storage and never mutates its input. Records whose
//! date does not parse are left out of every bucket and every range filter.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, Days, Local, NaiveDate};
use tracing::debug;

use crate::calendar::{self, DateRange};
use crate::config::{AggregatorConfig, TrailingWindow};
use crate::error::{LedgerError, Result};
use crate::filter::{Facet, RecordFilter};
use crate::models::{DatedRecord, PeriodBucket, RecordSummary};

/// Longest trailing window accepted by [`PeriodAggregator::build_daily_buckets`].
pub const MAX_DAILY_WINDOW: u32 = 366;

// ---------------------------------------------------------------------------
// PeriodAggregator
// ---------------------------------------------------------------------------

/// Builds chart buckets and filtered views from dated records.
#[derive(Debug, Clone, Default)]
pub struct PeriodAggregator {
    config: AggregatorConfig,
    today: Option<NaiveDate>,
}

impl PeriodAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self {
            config,
            today: None,
        }
    }

    /// Pin "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Latest valid record date, falling back to today for an empty or
    /// entirely malformed list.
    pub fn anchor_date(&self, records: &[DatedRecord]) -> NaiveDate {
        records
            .iter()
            .filter_map(DatedRecord::date)
            .max()
            .unwrap_or_else(|| self.today())
    }

    // -- Charts ------------------------------------------------------------

    /// Build one bucket per month over the trailing `window`, oldest first.
    ///
    /// The window ends at the month of the latest record date. A bucket is
    /// active when `active_range` lies entirely inside its month.
    pub fn build_monthly_buckets(
        &self,
        records: &[DatedRecord],
        window: TrailingWindow,
        active_range: Option<&DateRange>,
    ) -> Vec<PeriodBucket> {
        let anchor = calendar::first_of_month(self.anchor_date(records));

        let mut totals: HashMap<(i32, u32), f64> = HashMap::new();
        let mut skipped = 0usize;
        for record in records {
            match record.date() {
                Some(date) => {
                    *totals.entry(calendar::month_key(date)).or_insert(0.0) += record.amount
                }
                None => skipped += 1,
            }
        }

        // The oldest month is clamped to the first representable month, so the
        // window always holds exactly `months` buckets.
        let months = window.months();
        let oldest = calendar::shift_months(anchor, 1 - months as i32)
            .unwrap_or_else(|| calendar::first_of_month(NaiveDate::MIN));
        let starts = std::iter::successors(Some(oldest), |m| calendar::shift_months(*m, 1));
        let mut buckets: Vec<PeriodBucket> = starts
            .take(months as usize)
            .map(|start| {
                let range = DateRange::month_of(start);
                let (year, month_index) = calendar::month_key(start);
                PeriodBucket {
                    label: format!(
                        "{} {:02}",
                        self.config.locale.month_abbrev(month_index),
                        year.rem_euclid(100)
                    ),
                    year,
                    month_index,
                    day: None,
                    start: range.start,
                    end: range.end,
                    total: totals.get(&(year, month_index)).copied().unwrap_or(0.0),
                    is_active: active_range.is_some_and(|r| range.encloses(r)),
                    height_ratio: 0.0,
                }
            })
            .collect();

        self.apply_heights(&mut buckets, self.config.monthly_height_floor);

        debug!(
            anchor = %anchor,
            months,
            records = records.len(),
            skipped,
            "built monthly buckets"
        );
        buckets
    }

    /// Build one bucket per day over the trailing `days`, oldest first.
    pub fn build_daily_buckets(
        &self,
        records: &[DatedRecord],
        days: u32,
        active_range: Option<&DateRange>,
    ) -> Result<Vec<PeriodBucket>> {
        if days == 0 || days > MAX_DAILY_WINDOW {
            return Err(LedgerError::InvalidArgument(format!(
                "daily window must be within 1..={}, got {}",
                MAX_DAILY_WINDOW, days
            )));
        }

        let anchor = self.anchor_date(records);

        let mut totals: HashMap<NaiveDate, f64> = HashMap::new();
        for record in records {
            if let Some(date) = record.date() {
                *totals.entry(date).or_insert(0.0) += record.amount;
            }
        }

        let oldest = anchor
            .checked_sub_days(Days::new(u64::from(days) - 1))
            .unwrap_or(NaiveDate::MIN);
        let mut buckets: Vec<PeriodBucket> = oldest
            .iter_days()
            .take(days as usize)
            .map(|date| {
                let range = DateRange::day_of(date);
                PeriodBucket {
                    label: date.format("%d/%m").to_string(),
                    year: date.year(),
                    month_index: date.month0(),
                    day: Some(date.day()),
                    start: date,
                    end: date,
                    total: totals.get(&date).copied().unwrap_or(0.0),
                    is_active: active_range.is_some_and(|r| range.encloses(r)),
                    height_ratio: 0.0,
                }
            })
            .collect();

        self.apply_heights(&mut buckets, self.config.daily_height_floor);

        debug!(anchor = %anchor, days, records = records.len(), "built daily buckets");
        Ok(buckets)
    }

    /// Normalise totals against the largest one (never below `floor`) and
    /// clamp every bar to the minimum visible height.
    fn apply_heights(&self, buckets: &mut [PeriodBucket], floor: f64) {
        let max_total = buckets.iter().map(|b| b.total).fold(floor, f64::max);
        let min_pct = self.config.min_height_percent;
        for bucket in buckets.iter_mut() {
            let pct = (bucket.total / max_total * 100.0).round();
            bucket.height_ratio = pct.max(min_pct) / 100.0;
        }
    }

    /// Drill into a bucket: a filter covering exactly the bucket's days, with
    /// every facet condition cleared.
    pub fn select_bucket(&self, bucket: &PeriodBucket) -> RecordFilter {
        RecordFilter::new().date_range(bucket.range())
    }

    // -- Filtering ---------------------------------------------------------

    /// Records matching `filter`, in input order.
    ///
    /// Both range ends are inclusive. Without an explicit range the filter
    /// covers everything up to today.
    pub fn filter_records(
        &self,
        records: &[DatedRecord],
        filter: &RecordFilter,
    ) -> Vec<DatedRecord> {
        let range = filter
            .range()
            .unwrap_or_else(|| DateRange::until(self.today()));

        let matched: Vec<DatedRecord> = records
            .iter()
            .filter(|r| r.date().is_some_and(|d| range.contains(d)))
            .filter(|r| filter.matches_facets(r, &self.config))
            .cloned()
            .collect();

        debug!(
            range = %range,
            input = records.len(),
            matched = matched.len(),
            "filtered records"
        );
        matched
    }

    /// KPI totals over an already filtered list.
    pub fn summarize(&self, records: &[DatedRecord]) -> RecordSummary {
        records.iter().fold(RecordSummary::default(), |mut acc, r| {
            acc.total_amount += r.amount;
            acc.total_quantity += r.quantity;
            acc.record_count += 1;
            acc
        })
    }

    /// Distinct values of `facet`, sorted, led by the primary wildcard.
    pub fn facet_values(&self, records: &[DatedRecord], facet: Facet) -> Vec<String> {
        let distinct: BTreeSet<&str> = records
            .iter()
            .filter_map(|r| r.facet(facet))
            .map(str::trim)
            .filter(|v| !v.is_empty() && !self.config.is_wildcard(v))
            .collect();

        std::iter::once(self.config.primary_wildcard().to_string())
            .chain(distinct.into_iter().map(str::to_string))
            .collect()
    }
}
