//! Playback time formatting shared by the TUI and console output.

/// Format a time in seconds as `M:SS` with unpadded minutes.
///
/// Negative inputs clamp to `0:00`; a playback clock can briefly report a
/// negative position around a seek.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::format_time;

    #[test]
    fn zero_seconds() {
        assert_eq!(format_time(0.0), "0:00");
    }

    #[test]
    fn one_minute_one_second() {
        assert_eq!(format_time(61.0), "1:01");
    }

    #[test]
    fn minutes_are_not_padded_or_wrapped() {
        assert_eq!(format_time(3661.0), "61:01");
    }

    #[test]
    fn fractional_seconds_truncate() {
        assert_eq!(format_time(0.9), "0:00");
        assert_eq!(format_time(59.0), "0:59");
    }

    #[test]
    fn exact_minute_boundary() {
        assert_eq!(format_time(120.0), "2:00");
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        assert_eq!(format_time(-5.0), "0:00");
    }
}
