//! Reporting window resolution.
//!
//! A run always covers one calendar month. The month is either configured
//! explicitly (both year and month present) or taken from the local clock.
//!
//! ## Usage
//!
//! ```rust
//! use calsum::libs::window::{TargetMonth, TimeWindow};
//!
//! let target = TargetMonth::new(2024, 2).unwrap();
//! let window = TimeWindow::for_month(target);
//! assert_eq!(window.end.date().to_string(), "2024-02-29");
//! assert_eq!(target.destination_name(), "2024-02");
//! ```

use crate::libs::messages::Message;
use crate::msg_warning;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month selected for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMonth {
    pub year: i32,
    pub month: u32,
}

impl TargetMonth {
    /// Returns `None` when `month` is outside `1..=12` or the year is out of
    /// chrono's range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Picks the explicit month when both parts are configured and valid,
    /// otherwise the current month.
    ///
    /// A partially configured target (only year, or only month) is treated
    /// as "not configured". An invalid month number is reported and ignored.
    pub fn resolve(year: Option<i32>, month: Option<u32>) -> Self {
        Self::resolve_at(year, month, Local::now().date_naive())
    }

    /// Same as [`TargetMonth::resolve`] with an explicit "today".
    pub fn resolve_at(year: Option<i32>, month: Option<u32>, today: NaiveDate) -> Self {
        match (year, month) {
            (Some(year), Some(month)) => match Self::new(year, month) {
                Some(target) => target,
                None => {
                    msg_warning!(Message::InvalidTargetMonth(year, month));
                    Self::containing(today)
                }
            },
            _ => Self::containing(today),
        }
    }

    /// Parses `YYYY-MM`.
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn first_day(&self) -> NaiveDate {
        // Constructed through `new`, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 { (self.year + 1, 1) } else { (self.year, self.month + 1) };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or_else(|| self.first_day())
    }

    /// Name of the destination sheet for this month, e.g. `2024-05`.
    pub fn destination_name(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.destination_name())
    }
}

/// Inclusive span of local wall-clock time covered by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// First instant of day 1 through the last instant of the last day.
    pub fn for_month(target: TargetMonth) -> Self {
        let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
        Self {
            start: target.first_day().and_time(NaiveTime::MIN),
            end: target.last_day().and_time(end_of_day),
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Whether `[start, end]` touches the window at all.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start <= self.end && end >= self.start
    }
}
