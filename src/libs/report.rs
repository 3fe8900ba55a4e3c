//! Report assembly.
//!
//! Turns normalized events and their summary into the sheet layout that a
//! sink persists: a seven-column detail table starting at `A1`, a
//! three-column summary table starting at `I1`, and a pie chart bound to the
//! summary's label and hours columns and anchored at `M1`.
//!
//! ```text
//!  A..G  detail      I..K  summary      M  chart
//!  ┌──────────────┐  ┌─────────────┐   ┌──────┐
//!  │ header row   │  │ header row  │   │ pie  │
//!  │ one row/event│  │ one row/    │   │ I2:J │
//!  │              │  │ label       │   └──────┘
//!  └──────────────┘  └─────────────┘
//! ```

use crate::libs::error::ReportError;
use crate::libs::event::CalendarEventRecord;
use crate::libs::palette::{LabelResolution, Palette};
use crate::libs::summary::{Summary, SummaryRow};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DETAIL_HEADERS: [&str; 7] = ["Calendar Name", "Title", "Color", "Label", "Status", "Start Time", "Duration(h)"];
pub const SUMMARY_HEADERS: [&str; 3] = ["Label", "Total Hours", "Percentage(%)"];

/// Zero-based column of the detail table (`A`).
pub const DETAIL_FIRST_COL: u16 = 0;
/// Zero-based column of the summary table (`I`).
pub const SUMMARY_FIRST_COL: u16 = 8;
/// Zero-based anchor of the chart (`M1`).
pub const CHART_ANCHOR: (u32, u16) = (0, 12);

const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One cell value as stored by a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Text(_) => "text",
            CellValue::Number(_) => "number",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            CellValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u16,
    pub value: CellValue,
}

/// Inclusive zero-based rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl CellRange {
    pub fn new(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Self {
        Self {
            first_row,
            first_col,
            last_row,
            last_col,
        }
    }

    pub fn rows(&self) -> u32 {
        self.last_row - self.first_row + 1
    }

    /// A1 notation, e.g. `I2:J5`.
    pub fn to_a1(&self) -> String {
        format!(
            "{}{}:{}{}",
            column_name(self.first_col),
            self.first_row + 1,
            column_name(self.last_col),
            self.last_row + 1
        )
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// `0` → `A`, `25` → `Z`, `26` → `AA`.
pub fn column_name(col: u16) -> String {
    let mut name = Vec::new();
    let mut n = col as u32 + 1;
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        name.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pie" => Some(ChartKind::Pie),
            _ => None,
        }
    }
}

/// Chart attached to a destination: kind, data range and top-left anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBinding {
    pub kind: ChartKind,
    pub range: CellRange,
    pub anchor_row: u32,
    pub anchor_col: u16,
}

/// Calendar display name plus the normalized event.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedRecord {
    pub calendar_name: String,
    pub record: CalendarEventRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub calendar_name: String,
    pub title: String,
    pub color: String,
    pub label: String,
    pub status: String,
    pub start_time: String,
    pub duration_hours: f64,
}

impl DetailRow {
    fn cells(&self) -> [CellValue; 7] {
        [
            CellValue::Text(self.calendar_name.clone()),
            CellValue::Text(self.title.clone()),
            CellValue::Text(self.color.clone()),
            CellValue::Text(self.label.clone()),
            CellValue::Text(self.status.clone()),
            CellValue::Text(self.start_time.clone()),
            CellValue::Number(self.duration_hours),
        ]
    }
}

/// Everything a sink writes for one destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub destination: String,
    pub detail: Vec<DetailRow>,
    pub summary: Vec<SummaryRow>,
    pub chart: Option<ChartBinding>,
}

impl Report {
    /// Builds the detail and summary tables and the chart binding.
    ///
    /// Every record appears in the detail table regardless of status. When
    /// there are no summary rows the report carries no chart.
    pub fn assemble(destination: &str, records: &[SourcedRecord], palette: &Palette, summary: &Summary) -> Self {
        let detail = records
            .iter()
            .map(|sourced| {
                let record = &sourced.record;
                let resolution = palette.resolve(&record.color_tag);
                let color = match &resolution {
                    LabelResolution::UnknownTag => record.color_tag.clone(),
                    known => known.color().to_string(),
                };
                DetailRow {
                    calendar_name: sourced.calendar_name.clone(),
                    title: record.title.clone(),
                    color,
                    label: resolution.label().to_string(),
                    status: record.status.to_string(),
                    start_time: record.start_time.with_timezone(&Local).format(START_TIME_FORMAT).to_string(),
                    duration_hours: record.duration_hours,
                }
            })
            .collect();

        let chart = summary_range(summary.rows.len()).map(|range| ChartBinding {
            kind: ChartKind::Pie,
            range,
            anchor_row: CHART_ANCHOR.0,
            anchor_col: CHART_ANCHOR.1,
        });

        Self {
            destination: destination.to_string(),
            detail,
            summary: summary.rows.clone(),
            chart,
        }
    }

    /// Flattens both tables, headers included, into sink cells.
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity((self.detail.len() + 1) * 7 + (self.summary.len() + 1) * 3);

        push_row(&mut cells, 0, DETAIL_FIRST_COL, DETAIL_HEADERS.iter().map(|h| CellValue::Text(h.to_string())));
        for (i, row) in self.detail.iter().enumerate() {
            push_row(&mut cells, i as u32 + 1, DETAIL_FIRST_COL, row.cells());
        }

        push_row(&mut cells, 0, SUMMARY_FIRST_COL, SUMMARY_HEADERS.iter().map(|h| CellValue::Text(h.to_string())));
        for (i, row) in self.summary.iter().enumerate() {
            let values = [
                CellValue::Text(row.label.clone()),
                CellValue::Number(row.total_hours),
                CellValue::Number(row.percentage),
            ];
            push_row(&mut cells, i as u32 + 1, SUMMARY_FIRST_COL, values);
        }

        cells
    }
}

fn push_row<I: IntoIterator<Item = CellValue>>(cells: &mut Vec<Cell>, row: u32, first_col: u16, values: I) {
    cells.extend(values.into_iter().enumerate().map(|(offset, value)| Cell {
        row,
        col: first_col + offset as u16,
        value,
    }));
}

/// Label and hours columns of the summary data rows; `None` when empty.
pub fn summary_range(rows: usize) -> Option<CellRange> {
    if rows == 0 {
        return None;
    }
    Some(CellRange::new(1, SUMMARY_FIRST_COL, rows as u32, SUMMARY_FIRST_COL + 1))
}

/// Durable destination for assembled reports.
pub trait ReportSink {
    type Destination;

    /// Finds the named destination or creates it. Idempotent.
    fn open_destination(&mut self, name: &str) -> Result<Self::Destination, ReportError>;

    /// Replaces the destination's content with `report` in one step,
    /// updating any existing chart rather than adding another.
    fn write_report(&mut self, destination: &Self::Destination, report: &Report) -> anyhow::Result<()>;
}
