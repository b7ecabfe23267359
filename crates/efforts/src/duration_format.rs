/// Format elapsed seconds as `hh:mm:ss`, or `mm:ss` when under an hour.
///
/// Fractional seconds are truncated.
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as i64;

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_hours() {
        assert_eq!(format_duration(3661.0), "01:01:01");
        assert_eq!(format_duration(3600.0), "01:00:00");
    }

    #[test]
    fn test_without_hours() {
        assert_eq!(format_duration(65.0), "01:05");
        assert_eq!(format_duration(0.0), "00:00");
        assert_eq!(format_duration(3599.0), "59:59");
    }

    #[test]
    fn test_truncates_fraction() {
        assert_eq!(format_duration(59.99), "00:59");
    }

    #[test]
    fn test_long_activity() {
        // 100h 0m 1s
        assert_eq!(format_duration(360_001.0), "100:00:01");
    }
}
