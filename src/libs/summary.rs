use crate::libs::aggregate::WorkHoursAggregate;
use crate::libs::event::DEFAULT_COLOR_TAG;
use crate::libs::palette::Palette;
use serde::Serialize;

/// Hours and share of one label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub total_hours: f64,
    /// 0-100, one decimal.
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub rows: Vec<SummaryRow>,
    /// Hours across every non-default tag, labeled or not.
    pub grand_total: f64,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of row percentages; close to 100 when every tagged hour is labeled.
    pub fn percentage_total(&self) -> f64 {
        self.rows.iter().map(|row| row.percentage).sum()
    }
}

pub trait SummaryCalculator {
    fn summarize(&self, palette: &Palette) -> Summary;
}

impl SummaryCalculator for WorkHoursAggregate {
    /// One row per non-empty label, in configured color order.
    ///
    /// The default tag is left out of both the rows and the denominator.
    /// Tags that map to an unlabeled or unknown color still count toward the
    /// denominator, so rows may sum to less than 100%.
    fn summarize(&self, palette: &Palette) -> Summary {
        let tagged = self.without(DEFAULT_COLOR_TAG);
        let grand_total = tagged.total();

        let rows = palette
            .labels
            .tracked()
            .map(|(color, label)| {
                let hours = palette.tag_for_color(color).map(|tag| tagged.hours(tag)).unwrap_or(0.0);
                SummaryRow {
                    label: label.to_string(),
                    total_hours: hours,
                    percentage: percentage(hours, grand_total),
                }
            })
            .collect();

        Summary { rows, grand_total }
    }
}

/// `hours / total * 100` rounded to one decimal; zero when either side is zero.
pub fn percentage(hours: f64, total: f64) -> f64 {
    if hours == 0.0 || total == 0.0 {
        return 0.0;
    }
    round1(hours / total * 100.0)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
