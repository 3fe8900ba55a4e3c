use crate::{
    libs::{config::Config, data_storage::DataStorage, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the configuration file
    #[arg(short, long)]
    delete: bool,

    /// Write the default configuration without prompting
    #[arg(long, conflicts_with = "delete")]
    defaults: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        match Config::delete(&DataStorage::new())? {
            true => msg_success!(Message::ConfigDeleted),
            false => msg_info!(Message::ConfigNothingToDelete),
        }
        return Ok(());
    }

    if init_args.defaults {
        Config::default().save()?;
        msg_success!(Message::ConfigDefaultsWritten);
        return Ok(());
    }

    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
