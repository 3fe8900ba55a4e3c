#[cfg(test)]
mod tests {
    use calsum::api::FileSource;
    use calsum::db::db::Db;
    use calsum::db::sheets::Sheets;
    use calsum::libs::error::ReportError;
    use calsum::libs::palette::{Palette, GOOGLE_COLOR_NAMES};
    use calsum::libs::pipeline::{self, RunOptions};
    use calsum::libs::report::{Report, ReportSink};
    use calsum::libs::window::TargetMonth;
    use test_context::{test_context, AsyncTestContext};

    const EVENTS: &str = r#"{
        "calendars": [
            {
                "id": "work",
                "name": "Work",
                "events": [
                    {"title": "Sprint planning", "color": "2", "status": "OWNER",
                     "start": "2024-05-06T09:00:00+00:00", "end": "2024-05-06T11:00:00+00:00"},
                    {"title": "Refactoring", "color": "3", "status": "ACCEPTED",
                     "start": "2024-05-07T13:00:00+00:00", "end": "2024-05-07T14:00:00+00:00"},
                    {"title": "Offsite", "color": "2", "status": "DECLINED",
                     "start": "2024-05-08T09:00:00+00:00", "end": "2024-05-08T17:00:00+00:00"},
                    {"title": "Broken import", "color": "3", "status": "OWNER",
                     "start": "2024-05-09T12:00:00+00:00", "end": "2024-05-09T10:00:00+00:00"},
                    {"title": "Next month", "color": "2", "status": "OWNER",
                     "start": "2024-06-15T09:00:00+00:00", "end": "2024-06-15T10:00:00+00:00"}
                ]
            },
            {
                "id": "personal",
                "events": [
                    {"title": "Lunch", "status": "OWNER",
                     "start": "2024-05-10T12:00:00+00:00", "end": "2024-05-10T13:00:00+00:00"},
                    {"title": "Side project", "color": "7", "status": "OWNER",
                     "start": "2024-05-11T10:00:00+00:00", "end": "2024-05-11T11:00:00+00:00"}
                ]
            }
        ]
    }"#;

    struct PipelineTestContext {
        source: FileSource,
        sheets: Sheets,
        palette: Palette,
        target: TargetMonth,
    }

    impl AsyncTestContext for PipelineTestContext {
        async fn setup() -> Self {
            PipelineTestContext {
                source: FileSource::from_json(EVENTS).unwrap(),
                sheets: Sheets::from_db(Db::in_memory().unwrap()),
                palette: Palette::from_config(&GOOGLE_COLOR_NAMES, &["", "Meetings", "Deep work"]),
                target: TargetMonth::new(2024, 5).unwrap(),
            }
        }
    }

    fn calendars(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    /// Sink whose destinations can never be opened.
    struct ReadOnlySink;

    impl ReportSink for ReadOnlySink {
        type Destination = ();

        fn open_destination(&mut self, name: &str) -> Result<(), ReportError> {
            Err(ReportError::destination(name, "read-only workbook"))
        }

        fn write_report(&mut self, _: &(), _: &Report) -> anyhow::Result<()> {
            unreachable!("nothing is written to a read-only workbook")
        }
    }

    #[test_context(PipelineTestContext)]
    #[tokio::test]
    async fn test_full_run_writes_month_sheet(ctx: &mut PipelineTestContext) {
        let outcome = pipeline::run(
            &mut ctx.source,
            &mut ctx.sheets,
            &calendars(&["work", "personal"]),
            &ctx.palette,
            ctx.target,
            RunOptions::default(),
        )
        .await
        .unwrap();

        assert!(outcome.written);
        assert_eq!(outcome.report.destination, "2024-05");

        // June event filtered out, reversed event rejected
        let titles: Vec<_> = outcome.report.detail.iter().map(|row| row.title.as_str()).collect();
        assert_eq!(titles, vec!["Sprint planning", "Refactoring", "Offsite", "Lunch", "Side project"]);
        assert_eq!(outcome.rejected.len(), 1);
        assert!(matches!(outcome.rejected[0], ReportError::NegativeDuration { .. }));

        // Calendar without a name is shown by id
        assert_eq!(outcome.report.detail[3].calendar_name, "personal");
        assert_eq!(outcome.report.detail[3].color, "Default");

        // 2h Sage + 1h Grape + 1h unlabeled Peacock
        assert_eq!(outcome.summary.grand_total, 4.0);
        assert_eq!(outcome.summary.rows[0].label, "Meetings");
        assert_eq!(outcome.summary.rows[0].percentage, 50.0);
        assert_eq!(outcome.summary.rows[1].label, "Deep work");
        assert_eq!(outcome.summary.rows[1].percentage, 25.0);

        assert_eq!(outcome.gaps.len(), 1);
        assert_eq!(outcome.gaps[0].to_string(), "No label mapping for 'Peacock'");

        let sheet = ctx.sheets.get("2024-05").unwrap().unwrap();
        assert_eq!(ctx.sheets.chart_count(sheet.id).unwrap(), 1);
        assert_eq!(ctx.sheets.cells(sheet.id).unwrap().len(), outcome.report.cells().len());
    }

    #[test_context(PipelineTestContext)]
    #[tokio::test]
    async fn test_rerun_updates_same_sheet(ctx: &mut PipelineTestContext) {
        let ids = calendars(&["work"]);
        let mut snapshots = Vec::new();
        for _ in 0..2 {
            pipeline::run(&mut ctx.source, &mut ctx.sheets, &ids, &ctx.palette, ctx.target, RunOptions::default())
                .await
                .unwrap();
            let sheet = ctx.sheets.get("2024-05").unwrap().unwrap();
            snapshots.push((sheet.id, ctx.sheets.cells(sheet.id).unwrap(), ctx.sheets.chart(sheet.id).unwrap()));
        }

        let sheets = ctx.sheets.list().unwrap();
        assert_eq!(sheets.len(), 1);
        assert_eq!(ctx.sheets.chart_count(sheets[0].id).unwrap(), 1);
        assert_eq!(snapshots[0], snapshots[1]);
    }

    #[tokio::test]
    async fn test_owner_hours_count_and_other_do_not() {
        let mut source = FileSource::from_json(
            r#"{"calendars": [{"id": "team", "events": [
                {"title": "Wireframes", "color": "1", "status": "OWNER",
                 "start": "2024-03-12T09:00:00+00:00", "end": "2024-03-12T12:00:00+00:00"},
                {"title": "Standup", "color": "2", "status": "OTHER",
                 "start": "2024-03-13T09:00:00+00:00", "end": "2024-03-13T10:00:00+00:00"}
            ]}]}"#,
        )
        .unwrap();
        let mut sheets = Sheets::from_db(Db::in_memory().unwrap());
        let palette = Palette::from_config(&["Sage", "Grape"], &["Design", "Dev"]);

        let outcome = pipeline::run(
            &mut source,
            &mut sheets,
            &calendars(&["team"]),
            &palette,
            TargetMonth::new(2024, 3).unwrap(),
            RunOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.report.detail.len(), 2);
        assert_eq!(outcome.summary.grand_total, 3.0);
        let rows: Vec<_> = outcome.summary.rows.iter().map(|r| (r.label.as_str(), r.total_hours, r.percentage)).collect();
        assert_eq!(rows, vec![("Design", 3.0, 100.0), ("Dev", 0.0, 0.0)]);
        assert!(outcome.gaps.is_empty());

        let sheet = sheets.get("2024-03").unwrap().unwrap();
        let grid = sheets.grid(sheet.id).unwrap();
        assert_eq!(grid[1][8], "Design");
        assert_eq!(grid[2][8], "Dev");
    }

    #[test_context(PipelineTestContext)]
    #[tokio::test]
    async fn test_invalid_calendar_writes_nothing(ctx: &mut PipelineTestContext) {
        let error = pipeline::run(
            &mut ctx.source,
            &mut ctx.sheets,
            &calendars(&["work", "missing"]),
            &ctx.palette,
            ctx.target,
            RunOptions::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(
            error.downcast_ref::<ReportError>(),
            Some(&ReportError::InvalidCalendarIdentifier("missing".to_string()))
        );
        assert!(ctx.sheets.list().unwrap().is_empty());
    }

    #[test_context(PipelineTestContext)]
    #[tokio::test]
    async fn test_dry_run_leaves_store_untouched(ctx: &mut PipelineTestContext) {
        let outcome = pipeline::run(
            &mut ctx.source,
            &mut ctx.sheets,
            &calendars(&["work"]),
            &ctx.palette,
            ctx.target,
            RunOptions { dry_run: true },
        )
        .await
        .unwrap();

        assert!(!outcome.written);
        assert_eq!(outcome.report.detail.len(), 3);
        assert!(ctx.sheets.list().unwrap().is_empty());
    }

    #[test_context(PipelineTestContext)]
    #[tokio::test]
    async fn test_empty_month_writes_zero_rows(ctx: &mut PipelineTestContext) {
        let target = TargetMonth::new(2024, 8).unwrap();
        let outcome = pipeline::run(&mut ctx.source, &mut ctx.sheets, &calendars(&["work"]), &ctx.palette, target, RunOptions::default())
            .await
            .unwrap();

        assert!(outcome.report.detail.is_empty());
        assert_eq!(outcome.summary.grand_total, 0.0);
        assert_eq!(outcome.summary.rows.len(), 2);
        assert!(outcome.summary.rows.iter().all(|row| row.total_hours == 0.0 && row.percentage == 0.0));

        let sheet = ctx.sheets.get("2024-08").unwrap().unwrap();
        assert_eq!(ctx.sheets.grid(sheet.id).unwrap().len(), 3);
    }

    #[test_context(PipelineTestContext)]
    #[tokio::test]
    async fn test_destination_failure_is_fatal(ctx: &mut PipelineTestContext) {
        let error = pipeline::run(
            &mut ctx.source,
            &mut ReadOnlySink,
            &calendars(&["work"]),
            &ctx.palette,
            ctx.target,
            RunOptions::default(),
        )
        .await
        .unwrap_err();

        let report_error = error.downcast_ref::<ReportError>().unwrap();
        assert!(matches!(report_error, ReportError::DestinationCreationFailure { name, .. } if name == "2024-05"));
        assert!(report_error.is_fatal());
    }

    #[tokio::test]
    async fn test_build_report_without_source() {
        let palette = Palette::from_config(&GOOGLE_COLOR_NAMES, &["Calls"]);
        let (report, summary) = pipeline::build_report(TargetMonth::new(2024, 1).unwrap(), &[], &palette);
        assert_eq!(report.destination, "2024-01");
        assert_eq!(summary.rows.len(), 1);
        assert!(report.chart.is_some());
    }
}
