pub mod export;
pub mod init;
pub mod labels;
pub mod report;
pub mod sheets;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure calendars, color labels and the target month")]
    Init(init::InitArgs),
    #[command(about = "Aggregate the month's events by label and write the sheet")]
    Report(report::ReportArgs),
    #[command(about = "Export stored sheets to Excel, CSV or JSON")]
    Export(export::ExportArgs),
    #[command(about = "Show the color to label mapping")]
    Labels,
    #[command(about = "List stored sheets or show one")]
    Sheets(sheets::SheetsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Report(args) => report::cmd(args).await,
            Commands::Export(args) => export::cmd(args).await,
            Commands::Labels => labels::cmd(),
            Commands::Sheets(args) => sheets::cmd(args),
        }
    }
}
