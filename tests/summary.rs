#[cfg(test)]
mod tests {
    use calsum::libs::aggregate::{StatusFilter, WorkHoursAggregate};
    use calsum::libs::event::{AttendanceStatus, CalendarEventRecord};
    use calsum::libs::palette::{Palette, GOOGLE_COLOR_NAMES};
    use calsum::libs::summary::{percentage, round1, SummaryCalculator};
    use chrono::DateTime;

    fn record(tag: &str, status: AttendanceStatus, hours: f64) -> CalendarEventRecord {
        CalendarEventRecord {
            title: format!("{} {}", tag, status),
            color_tag: tag.to_string(),
            status,
            start_time: DateTime::parse_from_rfc3339("2024-05-06T09:00:00+00:00").unwrap(),
            duration_hours: hours,
        }
    }

    fn records() -> Vec<CalendarEventRecord> {
        vec![
            record("2", AttendanceStatus::Owner, 2.0),
            record("3", AttendanceStatus::Accepted, 1.0),
            record("2", AttendanceStatus::Declined, 5.0),
            record("3", AttendanceStatus::Tentative, 3.0),
            record("2", AttendanceStatus::Other, 0.5),
            record("0", AttendanceStatus::Owner, 4.0),
            record("1", AttendanceStatus::Owner, 1.0),
        ]
    }

    fn palette() -> Palette {
        Palette::from_config(&GOOGLE_COLOR_NAMES, &["", "Meetings", "Deep work"])
    }

    #[test]
    fn test_only_owner_and_accepted_count() {
        let filter = StatusFilter::tracked();
        assert!(filter.includes(AttendanceStatus::Owner));
        assert!(filter.includes(AttendanceStatus::Accepted));
        assert!(!filter.includes(AttendanceStatus::Declined));
        assert!(!filter.includes(AttendanceStatus::Tentative));
        assert!(!filter.includes(AttendanceStatus::Other));

        let aggregate = WorkHoursAggregate::build(&records(), &filter);
        assert_eq!(aggregate.hours("2"), 2.0);
        assert_eq!(aggregate.hours("3"), 1.0);
        assert_eq!(aggregate.hours("0"), 4.0);
        assert_eq!(aggregate.hours("1"), 1.0);
        assert_eq!(aggregate.hours("9"), 0.0);
        assert_eq!(aggregate.len(), 4);
    }

    #[test]
    fn test_aggregate_does_not_depend_on_order() {
        let filter = StatusFilter::default();
        let forward = records();
        let mut backward = records();
        backward.reverse();
        let mut rotated = records();
        rotated.rotate_left(3);

        let expected = WorkHoursAggregate::build(&forward, &filter);
        assert_eq!(WorkHoursAggregate::build(&backward, &filter), expected);
        assert_eq!(WorkHoursAggregate::build(&rotated, &filter), expected);
    }

    #[test]
    fn test_summary_rows_follow_color_order() {
        let aggregate = WorkHoursAggregate::build(&records(), &StatusFilter::tracked());
        let summary = aggregate.summarize(&palette());

        let labels: Vec<_> = summary.rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["Meetings", "Deep work"]);

        // Default tag excluded, unlabeled Lavender counted: 2 + 1 + 1
        assert_eq!(summary.grand_total, 4.0);
        assert_eq!(summary.rows[0].total_hours, 2.0);
        assert_eq!(summary.rows[0].percentage, 50.0);
        assert_eq!(summary.rows[1].total_hours, 1.0);
        assert_eq!(summary.rows[1].percentage, 25.0);
    }

    #[test]
    fn test_labeled_color_without_hours_gets_zero_row() {
        let palette = Palette::from_config(&GOOGLE_COLOR_NAMES, &["", "Meetings", "Deep work", "", "Admin"]);
        let aggregate = WorkHoursAggregate::build(&records(), &StatusFilter::tracked());
        let summary = aggregate.summarize(&palette);

        let admin = summary.rows.iter().find(|row| row.label == "Admin").unwrap();
        assert_eq!(admin.total_hours, 0.0);
        assert_eq!(admin.percentage, 0.0);
    }

    #[test]
    fn test_percentages_sum_to_hundred_when_everything_is_labeled() {
        let palette = Palette::from_config(&GOOGLE_COLOR_NAMES, &["Calls", "Meetings", "Deep work"]);
        let records = vec![
            record("1", AttendanceStatus::Owner, 1.0),
            record("2", AttendanceStatus::Owner, 1.0),
            record("3", AttendanceStatus::Accepted, 1.0),
        ];
        let summary = WorkHoursAggregate::build(&records, &StatusFilter::tracked()).summarize(&palette);

        assert_eq!(summary.rows.len(), 3);
        assert!(summary.rows.iter().all(|row| row.percentage == 33.3));
        let tolerance = 0.1 * summary.rows.len() as f64;
        assert!((summary.percentage_total() - 100.0).abs() <= tolerance);
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let records = vec![record("2", AttendanceStatus::Declined, 3.0), record("0", AttendanceStatus::Owner, 2.0)];
        let summary = WorkHoursAggregate::build(&records, &StatusFilter::tracked()).summarize(&palette());

        assert_eq!(summary.grand_total, 0.0);
        assert_eq!(summary.rows.len(), 2);
        assert!(summary.rows.iter().all(|row| row.total_hours == 0.0 && row.percentage == 0.0));
    }

    #[test]
    fn test_no_labels_means_no_rows() {
        let palette = Palette::from_config(&GOOGLE_COLOR_NAMES, &[] as &[&str]);
        let summary = WorkHoursAggregate::build(&records(), &StatusFilter::tracked()).summarize(&palette);
        assert!(summary.is_empty());
        assert_eq!(summary.grand_total, 4.0);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1.0, 3.0), 33.3);
        assert_eq!(percentage(2.0, 3.0), 66.7);
        assert_eq!(percentage(0.0, 3.0), 0.0);
        assert_eq!(percentage(3.0, 0.0), 0.0);
        assert_eq!(round1(12.34), 12.3);
    }
}
