//! Display implementation for calsum application messages.
//!
//! All user-facing text lives here so commands and library code only ever
//! refer to [`Message`] variants. Parameters are interpolated with plain
//! `format!`; the emoji prefixes are added by the `msg_*!` macros, not here.
//!
//! ```rust
//! use calsum::libs::messages::Message;
//!
//! assert_eq!(Message::SheetNotFound("2024-05".into()).to_string(), "Sheet '2024-05' not found");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigNothingToDelete => "No configuration file to delete".to_string(),
            Message::ConfigDefaultsWritten => "Default configuration written (Google Calendar colors, no labels)".to_string(),
            Message::ConfigModuleCalendars => "Calendars".to_string(),
            Message::ConfigModuleLabels => "Colors and labels".to_string(),
            Message::ConfigModuleTarget => "Target month".to_string(),
            Message::ConfigModuleGoogle => "Google Calendar API".to_string(),
            Message::NoCalendarsConfigured => "No calendars configured. Run 'calsum init' first.".to_string(),

            // === WINDOW MESSAGES ===
            Message::InvalidTargetMonth(year, month) => {
                format!("Configured month {}-{} is not valid, using the current month", year, month)
            }
            Message::InvalidMonthArgument(raw) => format!("Invalid month '{}', expected YYYY-MM", raw),
            Message::ReportWindow(start, end) => format!("Reporting window: {} .. {}", start, end),

            // === SOURCE MESSAGES ===
            Message::FetchingCalendar(id) => format!("Fetching events from calendar {}", id),
            Message::CalendarEventsFetched(name, count) => format!("{}: {} event(s)", name, count),
            Message::EventsFileNotFound(path) => format!("Events file not found: {}", path),
            Message::EventsFileParseError(error) => format!("Failed to parse events file: {}", error),
            Message::GoogleTokenRejected => "Google Calendar rejected the access token".to_string(),
            Message::GoogleRequestFailed(error) => format!("Google Calendar request failed: {}", error),
            Message::GoogleUnexpectedStatus(status) => format!("Google Calendar returned HTTP {}", status),
            Message::GoogleTokenRetryLimit => "Giving up after repeated token rejections".to_string(),

            // === RUN MESSAGES ===
            Message::EventRejected(reason) => format!("Skipping event: {}", reason),
            Message::MappingGap(description) => format!("Unlabeled events: {}", description),
            Message::ReportAssembled(detail, summary) => format!("Assembled {} detail row(s) and {} summary row(s)", detail, summary),
            Message::ReportWritten(destination) => format!("Report written to sheet '{}'", destination),
            Message::DryRunNoWrite(destination) => format!("Dry run: sheet '{}' left untouched", destination),
            Message::NoTrackedHours => "No tracked hours in this window, chart removed".to_string(),
            Message::GrandTotal(hours) => format!("Total tracked hours: {}", hours),

            // === SHEET MESSAGES ===
            Message::SheetsHeader => "Stored sheets".to_string(),
            Message::NoSheets => "No sheets stored yet. Run 'calsum report' first.".to_string(),
            Message::SheetNotFound(name) => format!("Sheet '{}' not found", name),
            Message::SheetHeader(name) => format!("Sheet {}", name),

            // === LABEL MESSAGES ===
            Message::LabelsHeader => "Color labels".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingSheet(sheet, format) => format!("Exporting sheet {} as {}...", sheet, format),
            Message::ExportCompleted(path) => format!("Data exported successfully to: {}", path),
            Message::ExportNoSheets => "Nothing to export".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::PromptCalendarIds => "Calendar ids (comma separated)".to_string(),
            Message::PromptColorNames => "Color names in color-id order (comma separated)".to_string(),
            Message::PromptLabelForColor(color) => format!("Label for {} (empty to ignore)", color),
            Message::PromptTargetYear => "Target year (empty for current month)".to_string(),
            Message::PromptTargetMonth => "Target month 1-12 (empty for current month)".to_string(),
            Message::PromptGoogleApiUrl => "Google Calendar API URL".to_string(),
            Message::PromptGoogleToken => "Enter your Google Calendar access token".to_string(),
        };
        write!(f, "{}", text)
    }
}
