//! Display helpers for countdown values

/// Render seconds as `HH:MM:SS`, or `MM:SS` when under an hour.
pub fn format_time(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hrs > 0 {
        format!("{:02}:{:02}:{:02}", hrs, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Coarse label such as `1h 5m` or `25m`. Seconds are dropped.
pub fn format_duration(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;

    if hrs > 0 {
        format!("{}h {}m", hrs, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Share of the session already elapsed, in percent.
pub fn progress_percent(total: u64, left: u64) -> f64 {
    if total > 0 {
        (total.saturating_sub(left) as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// `"{elapsed} of {total}"` label shown under the countdown.
pub fn elapsed_label(total: u64, left: u64) -> String {
    format!(
        "{} of {}",
        format_duration(total.saturating_sub(left)),
        format_duration(total)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(3661), "01:01:01");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(3600), "01:00:00");
        assert_eq!(format_time(25 * 60), "25:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3661), "1h 1m");
        assert_eq!(format_duration(59), "0m");
        assert_eq!(format_duration(7200), "2h 0m");
        assert_eq!(format_duration(90), "1m");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 0), 0.0);
        assert_eq!(progress_percent(100, 100), 0.0);
        assert_eq!(progress_percent(100, 25), 75.0);
        assert_eq!(progress_percent(10, 0), 100.0);
    }

    #[test]
    fn test_elapsed_label() {
        assert_eq!(elapsed_label(1500, 1500), "0m of 25m");
        assert_eq!(elapsed_label(3900, 60), "1h 4m of 1h 5m");
    }
}
