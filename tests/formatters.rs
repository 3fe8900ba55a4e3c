#[cfg(test)]
mod tests {
    use calsum::libs::formatter::{format_duration, format_hours, format_hours_hm, format_percentage};
    use chrono::Duration;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::zero()), "00:00");
        assert_eq!(format_duration(&Duration::minutes(59)), "00:59");
        assert_eq!(format_duration(&Duration::minutes(150)), "02:30");
        assert_eq!(format_duration(&Duration::hours(100)), "100:00");
        assert_eq!(format_duration(&Duration::minutes(-30)), "00:00");
    }

    #[test]
    fn test_format_hours_hm() {
        assert_eq!(format_hours_hm(1.5), "01:30");
        assert_eq!(format_hours_hm(0.25), "00:15");
        assert_eq!(format_hours_hm(7.999), "08:00");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(1.5), "1.5");
        assert_eq!(format_hours(2.0), "2");
        assert_eq!(format_hours(0.25), "0.25");
        assert_eq!(format_hours(1.0 / 3.0), "0.33");
        assert_eq!(format_hours(0.0), "0");
        assert_eq!(format_hours(0.001), "0");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(42.5), "42.5%");
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(100.0), "100.0%");
    }
}
