//! Export of stored sheets to CSV, JSON and Excel.
//!
//! ## Formats
//!
//! - **Excel**: one worksheet per sheet, header row in bold on gray, numbers
//!   as numbers, and the sheet's pie chart re-created from its stored binding
//! - **CSV**: the sheet's cell grid; exporting several sheets writes one file
//!   per sheet with a `_<sheet>` suffix
//! - **JSON**: grid plus chart binding in A1 notation
//!
//! Without an explicit output path the file is named
//! `calsum_export_<YYYYmmdd_HHMMSS>.<ext>` in the working directory.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use calsum::db::sheets::Sheets;
//! use calsum::libs::export::{ExportFormat, Exporter};
//!
//! let mut sheets = Sheets::new()?;
//! Exporter::new(ExportFormat::Excel, None).export_sheet(&mut sheets, "2024-05")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::{
    db::sheets::{to_grid, Sheet, Sheets},
    libs::{
        messages::Message,
        report::{column_name, Cell, CellValue, ChartBinding, ChartKind},
    },
    msg_bail_anyhow, msg_error_anyhow, msg_success,
};
use anyhow::Result;
use chrono::Local;
use rust_xlsxwriter::{Chart, ChartType, Format, Workbook, Worksheet};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExportSheet {
    pub name: String,
    pub updated_at: String,
    pub rows: Vec<Vec<String>>,
    pub chart: Option<ExportChart>,
}

#[derive(Debug, Serialize)]
pub struct ExportChart {
    pub kind: ChartKind,
    pub range: String,
    pub anchor: String,
}

impl From<&ChartBinding> for ExportChart {
    fn from(chart: &ChartBinding) -> Self {
        Self {
            kind: chart.kind,
            range: chart.range.to_a1(),
            anchor: format!("{}{}", column_name(chart.anchor_col), chart.anchor_row + 1),
        }
    }
}

/// A sheet loaded from the store with its cells and chart.
struct LoadedSheet {
    sheet: Sheet,
    cells: Vec<Cell>,
    chart: Option<ChartBinding>,
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("calsum_export_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, format.extension())));
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    /// Exports one sheet by name.
    pub fn export_sheet(&self, sheets: &mut Sheets, name: &str) -> Result<()> {
        let sheet = sheets.get(name)?.ok_or_else(|| msg_error_anyhow!(Message::SheetNotFound(name.to_string())))?;
        let loaded = load(sheets, sheet)?;

        match self.format {
            ExportFormat::Csv => write_csv(&self.output_path, &loaded)?,
            ExportFormat::Json => self.write_json(&[loaded])?,
            ExportFormat::Excel => self.write_excel(&[loaded])?,
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    /// Exports every stored sheet.
    ///
    /// Excel and JSON produce a single file; CSV produces one file per sheet
    /// and returns their paths.
    pub fn export_all(&self, sheets: &mut Sheets) -> Result<Vec<PathBuf>> {
        let all = sheets.list()?;
        if all.is_empty() {
            msg_bail_anyhow!(Message::ExportNoSheets);
        }
        let loaded = all.into_iter().map(|sheet| load(sheets, sheet)).collect::<Result<Vec<_>>>()?;

        let paths = match self.format {
            ExportFormat::Csv => {
                let base = self.output_path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
                let mut paths = Vec::with_capacity(loaded.len());
                for sheet in &loaded {
                    let path = self.output_path.with_file_name(format!("{}_{}.csv", base, sheet.sheet.name));
                    write_csv(&path, sheet)?;
                    msg_success!(Message::ExportCompleted(path.display().to_string()));
                    paths.push(path);
                }
                return Ok(paths);
            }
            ExportFormat::Json => {
                self.write_json(&loaded)?;
                vec![self.output_path.clone()]
            }
            ExportFormat::Excel => {
                self.write_excel(&loaded)?;
                vec![self.output_path.clone()]
            }
        };

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(paths)
    }

    fn write_json(&self, sheets: &[LoadedSheet]) -> Result<()> {
        let export: Vec<ExportSheet> = sheets
            .iter()
            .map(|loaded| ExportSheet {
                name: loaded.sheet.name.clone(),
                updated_at: loaded.sheet.updated_at.clone(),
                rows: to_grid(&loaded.cells),
                chart: loaded.chart.as_ref().map(ExportChart::from),
            })
            .collect();

        let json = if export.len() == 1 {
            serde_json::to_string_pretty(&export[0])?
        } else {
            serde_json::to_string_pretty(&serde_json::json!({
                "export_date": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                "sheets": export,
            }))?
        };
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn write_excel(&self, sheets: &[LoadedSheet]) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        for loaded in sheets {
            let mut worksheet = Worksheet::new();
            worksheet.set_name(&loaded.sheet.name)?;

            for cell in &loaded.cells {
                match &cell.value {
                    CellValue::Text(text) if cell.row == 0 => {
                        worksheet.write_string_with_format(cell.row, cell.col, text, &header_format)?;
                    }
                    CellValue::Text(text) => {
                        worksheet.write_string(cell.row, cell.col, text)?;
                    }
                    CellValue::Number(number) => {
                        worksheet.write_number(cell.row, cell.col, *number)?;
                    }
                }
            }

            if let Some(binding) = &loaded.chart {
                let chart = pie_chart(&loaded.sheet.name, binding);
                worksheet.insert_chart(binding.anchor_row, binding.anchor_col, &chart)?;
            }

            worksheet.autofit();
            workbook.push_worksheet(worksheet);
        }

        workbook.save(&self.output_path)?;
        Ok(())
    }
}

fn load(sheets: &mut Sheets, sheet: Sheet) -> Result<LoadedSheet> {
    let cells = sheets.cells(sheet.id)?;
    let chart = sheets.chart(sheet.id)?;
    Ok(LoadedSheet { sheet, cells, chart })
}

fn write_csv(path: &PathBuf, sheet: &LoadedSheet) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in to_grid(&sheet.cells) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Pie chart over the binding's first column (labels) and last column (values).
fn pie_chart(sheet_name: &str, binding: &ChartBinding) -> Chart {
    let range = binding.range;
    let mut chart = match binding.kind {
        ChartKind::Pie => Chart::new(ChartType::Pie),
    };
    chart
        .add_series()
        .set_categories((sheet_name, range.first_row, range.first_col, range.last_row, range.first_col))
        .set_values((sheet_name, range.first_row, range.last_col, range.last_row, range.last_col));
    chart.title().set_name(sheet_name);
    chart
}
