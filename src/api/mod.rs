//! Calendar event sources.
//!
//! A source resolves configured calendar ids and lists the events that
//! overlap a reporting window. Two implementations ship with calsum:
//!
//! - [`google::GoogleCalendar`]: Google Calendar REST API v3
//! - [`file::FileSource`]: a local JSON export, handy for offline runs and tests
//!
//! Calls are awaited one after another; a run never fetches concurrently.

use crate::libs::error::ReportError;
use crate::libs::event::RawEvent;
use crate::libs::window::TimeWindow;
use serde::{Deserialize, Serialize};

pub mod file;
pub mod google;

pub use file::FileSource;
pub use google::{GoogleCalendar, GoogleConfig};

/// Maximum number of times an expired or rejected token is re-requested.
pub const MAX_RETRY_COUNT: i32 = 3;

/// A resolved calendar. `name` is display metadata only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCalendar {
    pub id: String,
    pub name: String,
}

#[allow(async_fn_in_trait)]
pub trait EventSource {
    /// Resolves a calendar id.
    ///
    /// # Errors
    ///
    /// [`ReportError::InvalidCalendarIdentifier`] when no such calendar exists,
    /// [`ReportError::EventSource`] for transport and decoding failures.
    async fn calendar(&mut self, id: &str) -> Result<SourceCalendar, ReportError>;

    /// Events of `calendar` overlapping `window`, in source order.
    async fn events(&mut self, calendar: &SourceCalendar, window: &TimeWindow) -> Result<Vec<RawEvent>, ReportError>;
}
