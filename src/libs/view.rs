use crate::db::sheets::Sheet;
use crate::libs::formatter::{format_hours, format_hours_hm, format_percentage};
use crate::libs::report::{Report, DETAIL_HEADERS, SUMMARY_HEADERS};
use crate::libs::summary::Summary;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn detail(report: &Report) -> Result<()> {
        let mut table = Table::new();

        table.set_titles(DETAIL_HEADERS.iter().collect());
        for detail in &report.detail {
            table.add_row(row![
                detail.calendar_name,
                detail.title,
                detail.color,
                detail.label,
                detail.status,
                detail.start_time,
                r->format_hours(detail.duration_hours)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn summary(summary: &Summary) -> Result<()> {
        let mut table = Table::new();

        // Console only: the stored sheet keeps the three summary columns
        table.set_titles(SUMMARY_HEADERS.iter().chain(["Time"].iter()).collect());
        for row in &summary.rows {
            table.add_row(row![
                row.label,
                r->format_hours(row.total_hours),
                r->format_percentage(row.percentage),
                r->format_hours_hm(row.total_hours)
            ]);
        }
        table.add_row(row![
            b->"TOTAL",
            rb->format_hours(summary.grand_total),
            "",
            rb->format_hours_hm(summary.grand_total)
        ]);
        table.printstd();

        Ok(())
    }

    pub fn labels(pairs: &[(String, String)]) -> Result<()> {
        let mut table = Table::new();

        table.set_titles(row!["TAG", "COLOR", "LABEL"]);
        table.add_row(row!["0", "Default", "-"]);
        for (i, (color, label)) in pairs.iter().enumerate() {
            table.add_row(row![i + 1, color, if label.is_empty() { "-" } else { label.as_str() }]);
        }
        table.printstd();

        Ok(())
    }

    pub fn sheets(sheets: &[(Sheet, usize, bool)]) -> Result<()> {
        let mut table = Table::new();

        table.set_titles(row!["SHEET", "CELLS", "CHART", "UPDATED"]);
        for (sheet, cells, chart) in sheets {
            table.add_row(row![sheet.name, r->cells, if *chart { "pie" } else { "-" }, sheet.updated_at]);
        }
        table.printstd();

        Ok(())
    }

    pub fn grid(grid: &[Vec<String>]) -> Result<()> {
        let mut table = Table::new();

        for line in grid {
            table.add_row(line.iter().collect());
        }
        table.printstd();

        Ok(())
    }
}
