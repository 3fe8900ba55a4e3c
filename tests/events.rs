#[cfg(test)]
mod tests {
    use calsum::libs::error::ReportError;
    use calsum::libs::event::{normalize, AttendanceStatus, RawEvent, DEFAULT_COLOR_TAG};
    use chrono::DateTime;

    fn event(color: &str, status: Option<&str>, start: &str, end: &str) -> RawEvent {
        RawEvent {
            title: "Planning".to_string(),
            color: color.to_string(),
            status: status.map(str::to_string),
            start: DateTime::parse_from_rfc3339(start).unwrap(),
            end: DateTime::parse_from_rfc3339(end).unwrap(),
        }
    }

    #[test]
    fn test_duration_in_fractional_hours() {
        let record = normalize(&event("2", Some("OWNER"), "2024-05-02T10:00:00+02:00", "2024-05-02T11:30:00+02:00")).unwrap();
        assert_eq!(record.duration_hours, 1.5);
        assert_eq!(record.color_tag, "2");
        assert_eq!(record.status, AttendanceStatus::Owner);
        assert_eq!(record.title, "Planning");
    }

    #[test]
    fn test_duration_across_offsets() {
        // 09:00 UTC to 12:15 UTC
        let record = normalize(&event("1", None, "2024-05-02T09:00:00Z", "2024-05-02T14:15:00+02:00")).unwrap();
        assert_eq!(record.duration_hours, 3.25);
    }

    #[test]
    fn test_empty_color_becomes_default_tag() {
        let record = normalize(&event("", Some("YES"), "2024-05-02T10:00:00Z", "2024-05-02T11:00:00Z")).unwrap();
        assert_eq!(record.color_tag, DEFAULT_COLOR_TAG);

        let record = normalize(&event("  ", Some("YES"), "2024-05-02T10:00:00Z", "2024-05-02T11:00:00Z")).unwrap();
        assert_eq!(record.color_tag, "0");
    }

    #[test]
    fn test_missing_or_unknown_status_is_other() {
        let record = normalize(&event("3", None, "2024-05-02T10:00:00Z", "2024-05-02T11:00:00Z")).unwrap();
        assert_eq!(record.status, AttendanceStatus::Other);

        let record = normalize(&event("3", Some(""), "2024-05-02T10:00:00Z", "2024-05-02T11:00:00Z")).unwrap();
        assert_eq!(record.status, AttendanceStatus::Other);

        let record = normalize(&event("3", Some("needsAction"), "2024-05-02T10:00:00Z", "2024-05-02T11:00:00Z")).unwrap();
        assert_eq!(record.status, AttendanceStatus::Other);
    }

    #[test]
    fn test_status_vocabulary() {
        assert_eq!(AttendanceStatus::from_source(Some("OWNER")), AttendanceStatus::Owner);
        assert_eq!(AttendanceStatus::from_source(Some("YES")), AttendanceStatus::Accepted);
        assert_eq!(AttendanceStatus::from_source(Some("accepted")), AttendanceStatus::Accepted);
        assert_eq!(AttendanceStatus::from_source(Some("NO")), AttendanceStatus::Declined);
        assert_eq!(AttendanceStatus::from_source(Some("declined")), AttendanceStatus::Declined);
        assert_eq!(AttendanceStatus::from_source(Some("MAYBE")), AttendanceStatus::Tentative);
        assert_eq!(AttendanceStatus::from_source(Some("tentative")), AttendanceStatus::Tentative);
        assert_eq!(AttendanceStatus::from_source(None), AttendanceStatus::Other);
        assert_eq!(AttendanceStatus::Accepted.to_string(), "ACCEPTED");
    }

    #[test]
    fn test_zero_duration_is_kept() {
        let record = normalize(&event("4", Some("OWNER"), "2024-05-02T10:00:00Z", "2024-05-02T10:00:00Z")).unwrap();
        assert_eq!(record.duration_hours, 0.0);
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let result = normalize(&event("4", Some("OWNER"), "2024-05-02T11:00:00Z", "2024-05-02T10:00:00Z"));
        match result {
            Err(ReportError::NegativeDuration { title, hours }) => {
                assert_eq!(title, "Planning");
                assert_eq!(hours, -1.0);
            }
            other => panic!("expected NegativeDuration, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_event_from_json_defaults() {
        let raw: RawEvent = serde_json::from_str(
            r#"{"title": "Standup", "start": "2024-05-02T09:00:00+00:00", "end": "2024-05-02T09:15:00+00:00"}"#,
        )
        .unwrap();
        assert_eq!(raw.color, "");
        assert!(raw.status.is_none());
        assert_eq!(normalize(&raw).unwrap().duration_hours, 0.25);
    }
}
