//! SQLite-backed workbook store.
//!
//! ```rust,no_run
//! use calsum::db::{db::Db, sheets::Sheets};
//! use calsum::libs::{palette::{Palette, GOOGLE_COLOR_NAMES}, report::Report};
//!
//! let palette = Palette::from_config(&GOOGLE_COLOR_NAMES, &["Meetings"]);
//! let mut sheets = Sheets::from_db(Db::new()?);
//! let report = Report::assemble("2024-05", &[], &palette, &Default::default());
//! let sheet = sheets.write("2024-05", &report)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup and migration on open.
pub mod db;

/// Versioned schema changes.
pub mod migrations;

/// Named sheets with their cells and chart binding.
pub mod sheets;
