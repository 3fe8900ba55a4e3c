//! Named sheets of the workbook store.
//!
//! A sheet holds a sparse grid of cells and at most one chart binding. Writing
//! a report creates the sheet if needed, replaces its cells and upserts its
//! chart inside one transaction, so re-running a month updates the same sheet
//! in place and a failed write leaves no empty sheet behind.

use crate::db::db::Db;
use crate::libs::error::ReportError;
use crate::libs::report::{Cell, CellRange, CellValue, ChartBinding, ChartKind, Report, ReportSink};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

const INSERT_SHEET: &str = "INSERT OR IGNORE INTO sheets (name) VALUES (?1)";
const SELECT_SHEET_BY_NAME: &str = "SELECT id, name, created_at, updated_at FROM sheets WHERE name = ?1";
const SELECT_SHEET_ID: &str = "SELECT id FROM sheets WHERE name = ?1";
const SELECT_ALL_SHEETS: &str = "SELECT id, name, created_at, updated_at FROM sheets ORDER BY name";
const TOUCH_SHEET: &str = "UPDATE sheets SET updated_at = CURRENT_TIMESTAMP WHERE id = ?1";
const DELETE_CELLS: &str = "DELETE FROM cells WHERE sheet_id = ?1";
const INSERT_CELL: &str = "INSERT INTO cells (sheet_id, row_index, col_index, kind, value) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_CELLS: &str = "SELECT row_index, col_index, kind, value FROM cells WHERE sheet_id = ?1 ORDER BY row_index, col_index";
const UPSERT_CHART: &str = "
    INSERT INTO charts (sheet_id, kind, first_row, first_col, last_row, last_col, anchor_row, anchor_col)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    ON CONFLICT(sheet_id) DO UPDATE SET
        kind = excluded.kind,
        first_row = excluded.first_row,
        first_col = excluded.first_col,
        last_row = excluded.last_row,
        last_col = excluded.last_col,
        anchor_row = excluded.anchor_row,
        anchor_col = excluded.anchor_col
";
const DELETE_CHART: &str = "DELETE FROM charts WHERE sheet_id = ?1";
const SELECT_CHART: &str =
    "SELECT kind, first_row, first_col, last_row, last_col, anchor_row, anchor_col FROM charts WHERE sheet_id = ?1";
const COUNT_CHARTS: &str = "SELECT COUNT(*) FROM charts WHERE sheet_id = ?1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sheet {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

fn sheet_from_row(row: &Row) -> rusqlite::Result<Sheet> {
    Ok(Sheet {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

/// Where a report is headed. The sheet row itself is created by the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTarget {
    pub name: String,
}

pub struct Sheets {
    conn: Connection,
}

impl Sheets {
    /// Store in the platform data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    pub fn get(&mut self, name: &str) -> Result<Option<Sheet>> {
        self.conn.query_row(SELECT_SHEET_BY_NAME, params![name], sheet_from_row).optional().map_err(Into::into)
    }

    pub fn list(&mut self) -> Result<Vec<Sheet>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_SHEETS)?;
        let sheets = stmt.query_map([], sheet_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(sheets)
    }

    pub fn cells(&mut self, sheet_id: i64) -> Result<Vec<Cell>> {
        let mut stmt = self.conn.prepare(SELECT_CELLS)?;
        let rows = stmt.query_map(params![sheet_id], |row| {
            Ok((row.get::<_, u32>(0)?, row.get::<_, u16>(1)?, row.get::<_, String>(2)?, row.get::<_, String>(3)?))
        })?;

        let mut cells = Vec::new();
        for row in rows {
            let (row, col, kind, value) = row?;
            let value = match kind.as_str() {
                "number" => CellValue::Number(value.parse()?),
                _ => CellValue::Text(value),
            };
            cells.push(Cell { row, col, value });
        }
        Ok(cells)
    }

    pub fn chart(&mut self, sheet_id: i64) -> Result<Option<ChartBinding>> {
        let chart = self
            .conn
            .query_row(SELECT_CHART, params![sheet_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    CellRange::new(row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?),
                    row.get::<_, u32>(5)?,
                    row.get::<_, u16>(6)?,
                ))
            })
            .optional()?;

        Ok(chart.and_then(|(kind, range, anchor_row, anchor_col)| {
            ChartKind::parse(&kind).map(|kind| ChartBinding {
                kind,
                range,
                anchor_row,
                anchor_col,
            })
        }))
    }

    pub fn chart_count(&mut self, sheet_id: i64) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_CHARTS, params![sheet_id], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Cells as a dense grid of display strings, empty where unset.
    pub fn grid(&mut self, sheet_id: i64) -> Result<Vec<Vec<String>>> {
        Ok(to_grid(&self.cells(sheet_id)?))
    }

    /// Finds or creates the sheet `name` and replaces its cells and chart,
    /// all in one transaction. The same name always yields the same sheet.
    pub fn write(&mut self, name: &str, report: &Report) -> Result<Sheet> {
        let tx = self.conn.transaction()?;
        tx.execute(INSERT_SHEET, params![name])?;
        let sheet_id: i64 = tx.query_row(SELECT_SHEET_ID, params![name], |row| row.get(0))?;

        tx.execute(DELETE_CELLS, params![sheet_id])?;
        {
            let mut insert = tx.prepare(INSERT_CELL)?;
            for cell in report.cells() {
                insert.execute(params![sheet_id, cell.row, cell.col, cell.value.kind(), cell.value.to_string()])?;
            }
        }

        match &report.chart {
            Some(chart) => {
                tx.execute(
                    UPSERT_CHART,
                    params![
                        sheet_id,
                        chart.kind.as_str(),
                        chart.range.first_row,
                        chart.range.first_col,
                        chart.range.last_row,
                        chart.range.last_col,
                        chart.anchor_row,
                        chart.anchor_col
                    ],
                )?;
            }
            None => {
                tx.execute(DELETE_CHART, params![sheet_id])?;
            }
        }

        tx.execute(TOUCH_SHEET, params![sheet_id])?;
        let sheet = tx.query_row(SELECT_SHEET_BY_NAME, params![name], sheet_from_row)?;
        tx.commit()?;
        Ok(sheet)
    }
}

impl ReportSink for Sheets {
    type Destination = SheetTarget;

    fn open_destination(&mut self, name: &str) -> Result<SheetTarget, ReportError> {
        if name.trim().is_empty() {
            return Err(ReportError::destination(name, "sheet name is empty"));
        }
        self.get(name).map_err(|e| ReportError::destination(name, e))?;
        Ok(SheetTarget { name: name.to_string() })
    }

    fn write_report(&mut self, destination: &SheetTarget, report: &Report) -> Result<()> {
        self.write(&destination.name, report).map(|_| ())
    }
}

pub fn to_grid(cells: &[Cell]) -> Vec<Vec<String>> {
    let rows = cells.iter().map(|c| c.row as usize + 1).max().unwrap_or(0);
    let cols = cells.iter().map(|c| c.col as usize + 1).max().unwrap_or(0);
    let mut grid = vec![vec![String::new(); cols]; rows];
    for cell in cells {
        grid[cell.row as usize][cell.col as usize] = cell.value.to_string();
    }
    grid
}
