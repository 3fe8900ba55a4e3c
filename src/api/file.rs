//! Event source backed by a local JSON file.
//!
//! ```json
//! {
//!   "calendars": [
//!     {
//!       "id": "team@example.com",
//!       "name": "Team",
//!       "events": [
//!         {
//!           "title": "Design review",
//!           "color": "2",
//!           "status": "OWNER",
//!           "start": "2024-05-02T10:00:00+02:00",
//!           "end": "2024-05-02T11:30:00+02:00"
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use super::{EventSource, SourceCalendar};
use crate::libs::error::ReportError;
use crate::libs::event::RawEvent;
use crate::libs::messages::Message;
use crate::libs::window::TimeWindow;
use crate::msg_error_anyhow;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarFile {
    #[serde(default)]
    pub calendars: Vec<FileCalendar>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCalendar {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Clone)]
pub struct FileSource {
    file: CalendarFile,
}

impl FileSource {
    pub fn new(file: CalendarFile) -> Self {
        Self { file }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(msg_error_anyhow!(Message::EventsFileNotFound(path.display().to_string())));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: CalendarFile =
            serde_json::from_str(content).map_err(|e| msg_error_anyhow!(Message::EventsFileParseError(e.to_string())))?;
        Ok(Self::new(file))
    }

    fn find(&self, id: &str) -> Option<&FileCalendar> {
        self.file.calendars.iter().find(|calendar| calendar.id == id)
    }
}

impl EventSource for FileSource {
    async fn calendar(&mut self, id: &str) -> Result<SourceCalendar, ReportError> {
        let calendar = self.find(id).ok_or_else(|| ReportError::InvalidCalendarIdentifier(id.to_string()))?;
        Ok(SourceCalendar {
            id: calendar.id.clone(),
            name: calendar.name.clone().unwrap_or_else(|| calendar.id.clone()),
        })
    }

    async fn events(&mut self, calendar: &SourceCalendar, window: &TimeWindow) -> Result<Vec<RawEvent>, ReportError> {
        let source = self
            .find(&calendar.id)
            .ok_or_else(|| ReportError::InvalidCalendarIdentifier(calendar.id.clone()))?;
        Ok(source
            .events
            .iter()
            .filter(|event| window.overlaps(event.local_start(), event.local_end()))
            .cloned()
            .collect())
    }
}
