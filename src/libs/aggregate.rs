//! Work-hour aggregation by color tag.
//!
//! Only events the user actually committed to count toward work hours: ones
//! they organize and ones they accepted. Everything else still shows up in
//! the detail table but contributes nothing here.

use crate::libs::event::{AttendanceStatus, CalendarEventRecord};
use std::collections::BTreeMap;

/// Set of statuses whose durations are counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFilter {
    included: Vec<AttendanceStatus>,
}

impl StatusFilter {
    /// The one policy used by reports: `OWNER` and `ACCEPTED`.
    pub fn tracked() -> Self {
        Self {
            included: vec![AttendanceStatus::Owner, AttendanceStatus::Accepted],
        }
    }

    pub fn includes(&self, status: AttendanceStatus) -> bool {
        self.included.contains(&status)
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::tracked()
    }
}

/// Color tag → total hours of included events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkHoursAggregate {
    totals: BTreeMap<String, f64>,
}

impl WorkHoursAggregate {
    /// Folds records into per-tag totals. Result does not depend on order.
    pub fn build<'a, I>(records: I, filter: &StatusFilter) -> Self
    where
        I: IntoIterator<Item = &'a CalendarEventRecord>,
    {
        records
            .into_iter()
            .filter(|record| filter.includes(record.status))
            .fold(Self::default(), |mut acc, record| {
                *acc.totals.entry(record.color_tag.clone()).or_insert(0.0) += record.duration_hours;
                acc
            })
    }

    pub fn hours(&self, tag: &str) -> f64 {
        self.totals.get(tag).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.totals.contains_key(tag)
    }

    /// Copy of the aggregate without `tag`.
    pub fn without(&self, tag: &str) -> Self {
        let mut totals = self.totals.clone();
        totals.remove(tag);
        Self { totals }
    }

    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(tag, hours)| (tag.as_str(), *hours))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}
