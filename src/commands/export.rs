use crate::{
    db::sheets::Sheets,
    libs::{
        config::Config,
        export::{ExportFormat, Exporter},
        messages::Message,
        window::TargetMonth,
    },
    msg_bail_anyhow, msg_info,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Sheet to export as YYYY-MM (defaults to the configured or current month)
    #[arg(short, long)]
    month: Option<String>,

    /// Export every stored sheet
    #[arg(short, long, conflicts_with = "month")]
    all: bool,

    #[arg(short, long, value_enum, default_value = "excel")]
    format: ExportFormat,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn cmd(args: ExportArgs) -> Result<()> {
    let mut sheets = Sheets::new()?;
    let exporter = Exporter::new(args.format, args.output);

    if args.all {
        msg_info!(Message::ExportingSheet("*".to_string(), format!("{:?}", args.format)));
        exporter.export_all(&mut sheets)?;
        return Ok(());
    }

    let target = match &args.month {
        Some(raw) => match TargetMonth::parse(raw) {
            Some(target) => target,
            None => msg_bail_anyhow!(Message::InvalidMonthArgument(raw.clone())),
        },
        None => Config::read()?.target_month(),
    };

    msg_info!(Message::ExportingSheet(target.destination_name(), format!("{:?}", args.format)));
    exporter.export_sheet(&mut sheets, &target.destination_name())
}
