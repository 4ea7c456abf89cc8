//! Formatting helpers shared across renderers.

use chrono::{DateTime, Utc};

/// Format a ratio in [0, 1] as a whole percentage (e.g., "75%").
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Format a day count, dropping the fraction for whole days (e.g., "12 days", "1.5 days").
pub fn format_days(days: f64) -> String {
    let rounded = (days * 10.0).round() / 10.0;
    let unit = if rounded == 1.0 { "day" } else { "days" };
    if rounded.fract() == 0.0 {
        format!("{:.0} {}", rounded, unit)
    } else {
        format!("{:.1} {}", rounded, unit)
    }
}

/// Format `ts` relative to `now` in whole days (e.g., "in 12d", "3d ago").
///
/// Anything within the same 24 hours reads "today".
pub fn format_relative_to(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = ts.signed_duration_since(now).num_days();
    if days > 0 {
        format!("in {}d", days)
    } else if days < 0 {
        format!("{}d ago", -days)
    } else {
        "today".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.75), "75%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(1.0), "100%");
    }

    #[test]
    fn test_format_days() {
        assert_eq!(format_days(12.0), "12 days");
        assert_eq!(format_days(1.0), "1 day");
        assert_eq!(format_days(1.5), "1.5 days");
        assert_eq!(format_days(2.04), "2 days");
    }

    #[test]
    fn test_format_relative_to() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(format_relative_to(now + Duration::days(12), now), "in 12d");
        assert_eq!(format_relative_to(now - Duration::days(3), now), "3d ago");
        assert_eq!(format_relative_to(now + Duration::hours(5), now), "today");
        assert_eq!(format_relative_to(now - Duration::hours(5), now), "today");
    }
}
