use crate::{
    api::{EventSource, FileSource, GoogleCalendar},
    db::sheets::Sheets,
    libs::{
        config::Config,
        formatter::format_hours,
        messages::Message,
        pipeline::{self, RunOptions, RunOutcome},
        view::View,
        window::TargetMonth,
    },
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Year to report on (defaults to the configured or current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Month 1-12 to report on
    #[arg(short, long)]
    month: Option<u32>,

    /// Read events from a JSON file instead of Google Calendar
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Build the report without writing the sheet
    #[arg(long)]
    dry_run: bool,

    /// Also print the per-event detail table
    #[arg(short, long)]
    detail: bool,
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    let config = Config::read()?;
    if config.calendars.is_empty() {
        msg_bail_anyhow!(Message::NoCalendarsConfigured);
    }

    let target = target_month(&config, args.year, args.month);
    let options = RunOptions { dry_run: args.dry_run };

    let outcome = match &args.events {
        Some(path) => execute(&mut FileSource::load(path)?, &config, target, options).await?,
        None => {
            let google = config.google.clone().unwrap_or_default();
            execute(&mut GoogleCalendar::new(&google), &config, target, options).await?
        }
    };

    if args.detail {
        View::detail(&outcome.report)?;
    }
    View::summary(&outcome.summary)?;
    msg_info!(Message::GrandTotal(format_hours(outcome.summary.grand_total)));

    if outcome.written {
        msg_success!(Message::ReportWritten(outcome.report.destination.clone()));
    } else {
        msg_info!(Message::DryRunNoWrite(outcome.report.destination.clone()));
    }
    Ok(())
}

async fn execute<S: EventSource>(source: &mut S, config: &Config, target: TargetMonth, options: RunOptions) -> Result<RunOutcome> {
    let mut sheets = Sheets::new()?;
    pipeline::run(source, &mut sheets, &config.calendars, &config.palette(), target, options).await
}

/// Command-line year/month win over the configured target. A lone month
/// means that month of the current year.
fn target_month(config: &Config, year: Option<i32>, month: Option<u32>) -> TargetMonth {
    match (year, month) {
        (None, None) => config.target_month(),
        (year, month) => {
            let today = Local::now().date_naive();
            TargetMonth::resolve(Some(year.unwrap_or(today.year())), Some(month.unwrap_or(today.month())))
        }
    }
}
