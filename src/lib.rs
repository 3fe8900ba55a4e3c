//! # calsum - calendar hours by color label
//!
//! Reads a month of events from one or more calendars, converts each event
//! into hours, and totals the hours per color label. The per-event detail
//! table, the label summary and a pie chart over it are written to a sheet
//! named after the month.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use calsum::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
