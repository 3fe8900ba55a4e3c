#[cfg(test)]
mod tests {
    use calsum::libs::window::{TargetMonth, TimeWindow};
    use chrono::{NaiveDate, NaiveDateTime};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 18).unwrap()
    }

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_explicit_month_wins() {
        let target = TargetMonth::resolve_at(Some(2023), Some(3), today());
        assert_eq!(target, TargetMonth::new(2023, 3).unwrap());
        assert_eq!(target.destination_name(), "2023-03");
    }

    #[test]
    fn test_partial_target_falls_back_to_today() {
        let expected = TargetMonth::new(2024, 7).unwrap();
        assert_eq!(TargetMonth::resolve_at(Some(2023), None, today()), expected);
        assert_eq!(TargetMonth::resolve_at(None, Some(3), today()), expected);
        assert_eq!(TargetMonth::resolve_at(None, None, today()), expected);
    }

    #[test]
    fn test_invalid_month_falls_back_to_today() {
        let expected = TargetMonth::new(2024, 7).unwrap();
        assert_eq!(TargetMonth::resolve_at(Some(2024), Some(13), today()), expected);
        assert_eq!(TargetMonth::resolve_at(Some(2024), Some(0), today()), expected);
    }

    #[test]
    fn test_window_spans_whole_month() {
        let window = TimeWindow::for_month(TargetMonth::new(2024, 4).unwrap());
        assert_eq!(window.start, at("2024-04-01 00:00:00"));
        assert_eq!(window.end.date(), NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
        assert!(window.contains(at("2024-04-30 23:59:59")));
        assert!(!window.contains(at("2024-05-01 00:00:00")));
        assert!(!window.contains(at("2024-03-31 23:59:59")));
    }

    #[test]
    fn test_february_in_leap_and_common_years() {
        let leap = TimeWindow::for_month(TargetMonth::new(2024, 2).unwrap());
        assert_eq!(leap.end.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let common = TimeWindow::for_month(TargetMonth::new(2023, 2).unwrap());
        assert_eq!(common.end.date(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn test_overlap_with_events_crossing_the_boundary() {
        let window = TimeWindow::for_month(TargetMonth::new(2024, 5).unwrap());
        assert!(window.overlaps(at("2024-04-30 23:00:00"), at("2024-05-01 01:00:00")));
        assert!(window.overlaps(at("2024-05-31 23:30:00"), at("2024-06-01 00:30:00")));
        assert!(!window.overlaps(at("2024-04-30 08:00:00"), at("2024-04-30 09:00:00")));
        assert!(!window.overlaps(at("2024-06-01 00:00:00"), at("2024-06-01 01:00:00")));
    }

    #[test]
    fn test_parse_month_argument() {
        assert_eq!(TargetMonth::parse("2024-05"), TargetMonth::new(2024, 5));
        assert_eq!(TargetMonth::parse(" 2024-5 "), TargetMonth::new(2024, 5));
        assert!(TargetMonth::parse("2024").is_none());
        assert!(TargetMonth::parse("2024-00").is_none());
        assert_eq!(TargetMonth::new(2024, 5).unwrap().to_string(), "2024-05");
    }
}
