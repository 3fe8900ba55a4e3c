//! One reporting run, end to end.
//!
//! ```text
//! resolve window ─▶ fetch (all calendars) ─▶ normalize ─▶ aggregate
//!        ─▶ summarize ─▶ assemble ─▶ open destination ─▶ write
//! ```
//!
//! Every fallible read happens before the destination is touched: an unknown
//! calendar or a source failure aborts the run with nothing written. Events
//! that fail normalization and colors without labels are reported and the
//! run carries on.

use crate::api::{EventSource, SourceCalendar};
use crate::libs::aggregate::{StatusFilter, WorkHoursAggregate};
use crate::libs::error::ReportError;
use crate::libs::event::{normalize, RawEvent};
use crate::libs::formatter::format_hours;
use crate::libs::messages::Message;
use crate::libs::palette::Palette;
use crate::libs::report::{Report, ReportSink, SourcedRecord};
use crate::libs::summary::{Summary, SummaryCalculator};
use crate::libs::window::{TargetMonth, TimeWindow};
use crate::{msg_debug, msg_info, msg_warning};
use anyhow::Result;

/// Events fetched from one calendar.
#[derive(Debug, Clone)]
pub struct CalendarBatch {
    pub calendar: SourceCalendar,
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Assemble but do not touch the destination.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub target: TargetMonth,
    pub window: TimeWindow,
    pub report: Report,
    pub summary: Summary,
    /// Events dropped by normalization.
    pub rejected: Vec<ReportError>,
    /// Distinct color/label mapping gaps.
    pub gaps: Vec<ReportError>,
    pub written: bool,
}

/// Resolves every calendar and fetches its events, in configured order.
///
/// # Errors
///
/// The first [`ReportError::InvalidCalendarIdentifier`] or
/// [`ReportError::EventSource`] encountered.
pub async fn fetch_all<S: EventSource>(source: &mut S, calendar_ids: &[String], window: &TimeWindow) -> Result<Vec<CalendarBatch>, ReportError> {
    let mut batches = Vec::with_capacity(calendar_ids.len());
    for id in calendar_ids {
        msg_debug!(Message::FetchingCalendar(id.clone()));
        let calendar = source.calendar(id).await?;
        let events = source.events(&calendar, window).await?;
        msg_debug!(Message::CalendarEventsFetched(calendar.name.clone(), events.len()));
        batches.push(CalendarBatch { calendar, events });
    }
    Ok(batches)
}

/// Normalizes all fetched events; rejected events are returned separately.
pub fn normalize_batches(batches: &[CalendarBatch]) -> (Vec<SourcedRecord>, Vec<ReportError>) {
    let mut records = Vec::new();
    let mut rejected = Vec::new();
    for batch in batches {
        for event in &batch.events {
            match normalize(event) {
                Ok(record) => records.push(SourcedRecord {
                    calendar_name: batch.calendar.name.clone(),
                    record,
                }),
                Err(e) => rejected.push(e),
            }
        }
    }
    (records, rejected)
}

/// Distinct mapping gaps across `records`, in first-seen order.
pub fn mapping_gaps(records: &[SourcedRecord], palette: &Palette) -> Vec<ReportError> {
    let mut gaps: Vec<ReportError> = Vec::new();
    for sourced in records {
        if let Some(gap) = palette.gap(&sourced.record.color_tag) {
            if !gaps.contains(&gap) {
                gaps.push(gap);
            }
        }
    }
    gaps
}

/// Aggregates, summarizes and assembles the report for `target`.
pub fn build_report(target: TargetMonth, records: &[SourcedRecord], palette: &Palette) -> (Report, Summary) {
    let filter = StatusFilter::tracked();
    let aggregate = WorkHoursAggregate::build(records.iter().map(|sourced| &sourced.record), &filter);
    let summary = aggregate.summarize(palette);
    let report = Report::assemble(&target.destination_name(), records, palette, &summary);
    (report, summary)
}

/// Runs the whole pipeline for `target` against `source` and `sink`.
///
/// # Errors
///
/// Fatal [`ReportError`]s (wrapped in `anyhow`), or a sink failure while
/// writing. Nothing is written when fetching fails.
pub async fn run<S, K>(
    source: &mut S,
    sink: &mut K,
    calendar_ids: &[String],
    palette: &Palette,
    target: TargetMonth,
    options: RunOptions,
) -> Result<RunOutcome>
where
    S: EventSource,
    K: ReportSink,
{
    let window = TimeWindow::for_month(target);
    msg_debug!(Message::ReportWindow(window.start.to_string(), window.end.to_string()));

    let batches = fetch_all(source, calendar_ids, &window).await?;

    let (records, rejected) = normalize_batches(&batches);
    for error in &rejected {
        msg_warning!(Message::EventRejected(error.to_string()));
    }

    let gaps = mapping_gaps(&records, palette);
    for gap in &gaps {
        msg_warning!(Message::MappingGap(gap.to_string()));
    }

    let (report, summary) = build_report(target, &records, palette);
    msg_debug!(Message::ReportAssembled(report.detail.len(), report.summary.len()));

    let written = if options.dry_run {
        false
    } else {
        let destination = sink.open_destination(&report.destination)?;
        sink.write_report(&destination, &report)?;
        true
    };

    if written && report.chart.is_none() {
        msg_info!(Message::NoTrackedHours);
    }
    msg_debug!(Message::GrandTotal(format_hours(summary.grand_total)));

    Ok(RunOutcome {
        target,
        window,
        report,
        summary,
        rejected,
        gaps,
        written,
    })
}
