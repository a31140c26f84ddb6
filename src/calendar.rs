//! Calendar-date helpers for month bucketing and inclusive range checks.
//!
//! All arithmetic works on [`NaiveDate`] values, so there is no timezone in
//! play: a record dated `2023-03-31` belongs to March no matter where the
//! caller runs. Month shifts go through chrono's `Months`, which clamps the
//! day of month and rolls the year over correctly.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO calendar date (`YYYY-MM-DD`).
///
/// A trailing time component (`2023-03-10T08:30:00`) is ignored. Returns
/// `None` for anything that is not a valid calendar date with a 4-digit,
/// unsigned year.
pub fn parse_iso(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split('T').next().unwrap_or("");
    if !has_iso_shape(date_part) {
        return None;
    }
    NaiveDate::parse_from_str(date_part, ISO_FORMAT).ok()
}

fn has_iso_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9].iter().all(|&i| b[i].is_ascii_digit())
}

pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(date)
}

/// Shift a date by a signed number of months.
pub fn shift_months(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let months = Months::new(delta.unsigned_abs());
    if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

/// `(year, 0-based month)` identity of the month containing `date`.
pub fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month0())
}

// ---------------------------------------------------------------------------
// DateRange
// ---------------------------------------------------------------------------

/// An inclusive `[start, end]` range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(LedgerError::InvalidArgument(format!(
                "range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Build a range from two ISO date strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let s = parse_iso(start).ok_or_else(|| LedgerError::InvalidDate(start.to_string()))?;
        let e = parse_iso(end).ok_or_else(|| LedgerError::InvalidDate(end.to_string()))?;
        Self::new(s, e)
    }

    /// Everything from the earliest representable date up to `today`.
    pub fn until(today: NaiveDate) -> Self {
        Self {
            start: NaiveDate::MIN,
            end: today,
        }
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            start: first_of_month(date),
            end: last_of_month(date),
        }
    }

    /// The single day `date`.
    pub fn day_of(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Both ends are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True when `other` lies entirely inside this range.
    pub fn encloses(&self, other: &DateRange) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    pub fn start_iso(&self) -> String {
        to_iso(self.start)
    }

    pub fn end_iso(&self) -> String {
        to_iso(self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
