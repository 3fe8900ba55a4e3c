//! Calendar events and their normalization into report records.
//!
//! Event sources hand over [`RawEvent`]s exactly as the calendar stores them:
//! the color may be empty, the caller's attendance status may be missing, and
//! start/end carry their own UTC offsets. [`normalize`] turns a raw event into
//! an immutable [`CalendarEventRecord`] with a non-empty color tag, a known
//! status and a duration in hours.
//!
//! ## Status vocabulary
//!
//! | Source value                      | Status      |
//! |-----------------------------------|-------------|
//! | `OWNER`                           | `Owner`     |
//! | `YES`, `accepted`                 | `Accepted`  |
//! | `NO`, `declined`                  | `Declined`  |
//! | `MAYBE`, `tentative`              | `Tentative` |
//! | empty, missing, anything else     | `Other`     |

use crate::libs::error::ReportError;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color tag used when an event carries no color.
pub const DEFAULT_COLOR_TAG: &str = "0";

/// The calling user's relationship to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    Owner,
    Accepted,
    Declined,
    Tentative,
    Other,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Owner => "OWNER",
            AttendanceStatus::Accepted => "ACCEPTED",
            AttendanceStatus::Declined => "DECLINED",
            AttendanceStatus::Tentative => "TENTATIVE",
            AttendanceStatus::Other => "OTHER",
        }
    }

    /// Maps an optional source value; absent or blank means `Other`.
    pub fn from_source(value: Option<&str>) -> Self {
        value.map(|v| v.parse().unwrap_or(AttendanceStatus::Other)).unwrap_or(AttendanceStatus::Other)
    }
}

impl FromStr for AttendanceStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.trim().to_ascii_uppercase().as_str() {
            "OWNER" => AttendanceStatus::Owner,
            "YES" | "ACCEPTED" => AttendanceStatus::Accepted,
            "NO" | "DECLINED" => AttendanceStatus::Declined,
            "MAYBE" | "TENTATIVE" => AttendanceStatus::Tentative,
            _ => AttendanceStatus::Other,
        };
        Ok(status)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event as delivered by an event source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub title: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub status: Option<String>,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl RawEvent {
    /// Start expressed in local wall-clock time.
    pub fn local_start(&self) -> NaiveDateTime {
        self.start.with_timezone(&Local).naive_local()
    }

    pub fn local_end(&self) -> NaiveDateTime {
        self.end.with_timezone(&Local).naive_local()
    }
}

/// A normalized event ready for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEventRecord {
    pub title: String,
    pub color_tag: String,
    pub status: AttendanceStatus,
    pub start_time: DateTime<FixedOffset>,
    pub duration_hours: f64,
}

/// Normalizes one raw event.
///
/// - an empty color becomes [`DEFAULT_COLOR_TAG`]
/// - an empty or unknown status becomes [`AttendanceStatus::Other`]
/// - duration is `(end - start)` in fractional hours; zero is kept
///
/// # Errors
///
/// [`ReportError::NegativeDuration`] when the event ends before it starts.
pub fn normalize(event: &RawEvent) -> Result<CalendarEventRecord, ReportError> {
    let seconds = (event.end - event.start).num_milliseconds() as f64 / 1000.0;
    let duration_hours = seconds / 3600.0;
    if duration_hours < 0.0 {
        return Err(ReportError::NegativeDuration {
            title: event.title.clone(),
            hours: duration_hours,
        });
    }

    let color = event.color.trim();
    let color_tag = if color.is_empty() { DEFAULT_COLOR_TAG.to_string() } else { color.to_string() };

    Ok(CalendarEventRecord {
        title: event.title.clone(),
        color_tag,
        status: AttendanceStatus::from_source(event.status.as_deref()),
        start_time: event.start,
        duration_hours,
    })
}
