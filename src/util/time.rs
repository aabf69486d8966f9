//! Duration and date formatting for the report header.

use chrono::{DateTime, TimeDelta, Utc};

/// RFC 850 layout, e.g. `Tuesday, 14-Jan-25 10:30:00 UTC`.
const TEST_DATE_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S %Z";

/// Seconds in `delta`, including the fractional part.
#[must_use]
pub fn delta_seconds(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}

/// Format the wall-clock span of a run.
///
/// Spans under a minute print as fractional seconds (`45.000000 s`). Longer
/// spans print as `<minutes>m:<seconds>s`, truncating both components, so
/// 125.9 seconds is `2m:5s`.
#[must_use]
pub fn format_total_time(delta: TimeDelta) -> String {
    let seconds = delta_seconds(delta);
    if seconds < 60.0 {
        return format!("{seconds:.6} s");
    }

    let whole = delta.num_seconds();
    format!("{}m:{}s", whole / 60, whole % 60)
}

/// Format the instant a run started.
#[must_use]
pub fn format_test_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TEST_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_total_time_under_a_minute() {
        assert_eq!(format_total_time(TimeDelta::seconds(45)), "45.000000 s");
        assert_eq!(
            format_total_time(TimeDelta::milliseconds(1_250)),
            "1.250000 s"
        );
    }

    #[test]
    fn test_format_total_time_truncates() {
        assert_eq!(format_total_time(TimeDelta::seconds(125)), "2m:5s");
        assert_eq!(format_total_time(TimeDelta::milliseconds(125_900)), "2m:5s");
        assert_eq!(format_total_time(TimeDelta::seconds(60)), "1m:0s");
        assert_eq!(format_total_time(TimeDelta::seconds(3_599)), "59m:59s");
    }

    #[test]
    fn test_format_total_time_long_runs_keep_counting_minutes() {
        assert_eq!(format_total_time(TimeDelta::seconds(7_265)), "121m:5s");
    }

    #[test]
    fn test_format_test_date() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 14, 10, 30, 0).unwrap();
        assert_eq!(format_test_date(ts), "Tuesday, 14-Jan-25 10:30:00 UTC");
    }
}
