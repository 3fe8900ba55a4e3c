//! Configuration management for calsum.
//!
//! The configuration is a single pretty-printed JSON file (`config.json`) in
//! the platform data directory resolved by [`DataStorage`]. It holds:
//!
//! - **calendars**: calendar ids to read, in report order
//! - **colors**: color names in color-id order; the i-th name is tag `i + 1`
//! - **labels**: one label per color, index-aligned with `colors`; an empty
//!   label means "do not report this color"
//! - **year / month**: optional fixed target month; both must be set
//! - **google**: optional Google Calendar API settings
//!
//! A missing file is not an error: [`Config::read`] returns defaults, with
//! the eleven Google Calendar event colors and no labels.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use calsum::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.calendars.push("team@example.com".to_string());
//! config.save()?;
//!
//! let palette = config.palette();
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::api::google::GoogleConfig;
use crate::libs::messages::Message;
use crate::libs::palette::{Palette, GOOGLE_COLOR_NAMES};
use crate::libs::window::TargetMonth;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A settings group offered by the interactive wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub calendars: Vec<String>,

    #[serde(default = "default_colors")]
    pub colors: Vec<String>,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub google: Option<GoogleConfig>,
}

fn default_colors() -> Vec<String> {
    GOOGLE_COLOR_NAMES.iter().map(|name| name.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            calendars: Vec::new(),
            colors: default_colors(),
            labels: Vec::new(),
            year: None,
            month: None,
            google: None,
        }
    }
}

impl Config {
    /// Loads the configuration from the platform data directory.
    ///
    /// Returns defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` when there was none.
    pub fn delete(storage: &DataStorage) -> Result<bool> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Color and label maps for one run.
    pub fn palette(&self) -> Palette {
        Palette::from_config(&self.colors, &self.labels)
    }

    /// Configured month when both parts are set and valid, else the current one.
    pub fn target_month(&self) -> TargetMonth {
        TargetMonth::resolve(self.year, self.month)
    }

    /// `(color, label)` pairs in color order, empty labels included.
    pub fn label_pairs(&self) -> Vec<(String, String)> {
        self.colors
            .iter()
            .enumerate()
            .map(|(i, color)| (color.clone(), self.labels.get(i).cloned().unwrap_or_default()))
            .collect()
    }

    /// Interactive setup wizard. Existing values are offered as defaults.
    ///
    /// # Errors
    ///
    /// Fails when the terminal cannot be prompted or the existing file
    /// cannot be parsed.
    pub fn init() -> Result<Self> {
        Self::init_at(&DataStorage::new())
    }

    /// Runs the wizard over the configuration stored in `storage`. The file is
    /// loaded before any prompt, so a corrupt file fails without touching it.
    pub fn init_at(storage: &DataStorage) -> Result<Self> {
        let mut config = Self::read_from(storage)?;
        let theme = ColorfulTheme::default();

        let modules = vec![
            ConfigModule {
                key: "calendars".to_string(),
                name: Message::ConfigModuleCalendars.to_string(),
            },
            ConfigModule {
                key: "labels".to_string(),
                name: Message::ConfigModuleLabels.to_string(),
            },
            ConfigModule {
                key: "target".to_string(),
                name: Message::ConfigModuleTarget.to_string(),
            },
            GoogleConfig::module(),
        ];

        let selected = MultiSelect::with_theme(&theme)
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "calendars" => {
                    msg_print!(Message::ConfigModuleCalendars);
                    let calendars: String = Input::with_theme(&theme)
                        .with_prompt(Message::PromptCalendarIds.to_string())
                        .default(config.calendars.join(", "))
                        .allow_empty(true)
                        .interact_text()?;
                    config.calendars = split_list(&calendars);
                }
                "labels" => {
                    msg_print!(Message::ConfigModuleLabels);
                    let colors: String = Input::with_theme(&theme)
                        .with_prompt(Message::PromptColorNames.to_string())
                        .default(config.colors.join(", "))
                        .interact_text()?;
                    let previous = config.label_pairs();
                    config.colors = split_list(&colors);
                    config.labels = Vec::with_capacity(config.colors.len());
                    for color in config.colors.clone() {
                        let current = previous.iter().find(|(c, _)| *c == color).map(|(_, l)| l.clone()).unwrap_or_default();
                        let label: String = Input::with_theme(&theme)
                            .with_prompt(Message::PromptLabelForColor(color).to_string())
                            .default(current)
                            .allow_empty(true)
                            .interact_text()?;
                        config.labels.push(label.trim().to_string());
                    }
                }
                "target" => {
                    msg_print!(Message::ConfigModuleTarget);
                    let year: String = Input::with_theme(&theme)
                        .with_prompt(Message::PromptTargetYear.to_string())
                        .default(config.year.map(|y| y.to_string()).unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    let month: String = Input::with_theme(&theme)
                        .with_prompt(Message::PromptTargetMonth.to_string())
                        .default(config.month.map(|m| m.to_string()).unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    config.year = year.trim().parse().ok();
                    config.month = month.trim().parse().ok();
                }
                "google" => config.google = Some(GoogleConfig::init(&config.google)?),
                _ => {}
            }
        }

        Ok(config)
    }
}

/// Splits a comma separated answer, dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty()).map(str::to_string).collect()
}
