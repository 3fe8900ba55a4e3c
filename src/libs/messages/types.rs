#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNothingToDelete,
    ConfigDefaultsWritten,
    ConfigModuleCalendars,
    ConfigModuleLabels,
    ConfigModuleTarget,
    ConfigModuleGoogle,
    NoCalendarsConfigured,

    // === WINDOW MESSAGES ===
    InvalidTargetMonth(i32, u32),  // year, month
    InvalidMonthArgument(String), // raw argument
    ReportWindow(String, String), // start, end

    // === SOURCE MESSAGES ===
    FetchingCalendar(String),             // calendar id
    CalendarEventsFetched(String, usize), // calendar name, count
    EventsFileNotFound(String),           // path
    EventsFileParseError(String),         // error
    GoogleTokenRejected,
    GoogleRequestFailed(String),    // error
    GoogleUnexpectedStatus(u16),    // status code
    GoogleTokenRetryLimit,

    // === RUN MESSAGES ===
    EventRejected(String),     // reason
    MappingGap(String),        // description
    ReportAssembled(usize, usize), // detail rows, summary rows
    ReportWritten(String),     // destination
    DryRunNoWrite(String),     // destination
    NoTrackedHours,
    GrandTotal(String),        // formatted hours

    // === SHEET MESSAGES ===
    SheetsHeader,
    NoSheets,
    SheetNotFound(String),
    SheetHeader(String),

    // === LABEL MESSAGES ===
    LabelsHeader,

    // === EXPORT MESSAGES ===
    ExportingSheet(String, String), // sheet, format
    ExportCompleted(String),        // path
    ExportNoSheets,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,

    // === PROMPTS ===
    PromptSelectModules,
    PromptCalendarIds,
    PromptColorNames,
    PromptLabelForColor(String), // color name
    PromptTargetYear,
    PromptTargetMonth,
    PromptGoogleApiUrl,
    PromptGoogleToken,
}
