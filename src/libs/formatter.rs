//! Display formatting for hours and percentages.

use chrono::Duration;

/// `HH:MM`, negative durations clamp to `00:00`.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Fractional hours as `HH:MM`, rounded to the nearest minute.
pub fn format_hours_hm(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as i64;
    format_duration(&Duration::minutes(minutes))
}

/// Hours with two decimals, trailing zeros trimmed: `1.5`, `2`, `0.25`.
pub fn format_hours(hours: f64) -> String {
    let text = format!("{:.2}", hours);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// One decimal with a percent sign: `42.5%`.
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}
