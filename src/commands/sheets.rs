use crate::{
    db::sheets::Sheets,
    libs::{messages::Message, view::View},
    msg_bail_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SheetsArgs {
    /// Print the content of one sheet
    #[arg(short, long)]
    show: Option<String>,
}

pub fn cmd(args: SheetsArgs) -> Result<()> {
    let mut sheets = Sheets::new()?;

    if let Some(name) = args.show {
        let Some(sheet) = sheets.get(&name)? else {
            msg_bail_anyhow!(Message::SheetNotFound(name));
        };
        msg_print!(Message::SheetHeader(sheet.name.clone()), true);
        View::grid(&sheets.grid(sheet.id)?)?;
        if let Some(chart) = sheets.chart(sheet.id)? {
            msg_print!(format!("{} chart over {}", chart.kind.as_str(), chart.range));
        }
        return Ok(());
    }

    let all = sheets.list()?;
    if all.is_empty() {
        msg_info!(Message::NoSheets);
        return Ok(());
    }

    let mut rows = Vec::with_capacity(all.len());
    for sheet in all {
        let cells = sheets.cells(sheet.id)?.len();
        let chart = sheets.chart_count(sheet.id)? > 0;
        rows.push((sheet, cells, chart));
    }
    msg_print!(Message::SheetsHeader, true);
    View::sheets(&rows)
}
