use chrono::{DateTime, Duration, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// `m:ss`, clamped at zero.
#[must_use]
pub fn format_elapsed(value: Duration) -> String {
    let secs = value.num_seconds().max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcq_core::time::fixed_now;

    #[test]
    fn elapsed_uses_minutes_and_padded_seconds() {
        assert_eq!(format_elapsed(Duration::seconds(95)), "1:35");
        assert_eq!(format_elapsed(Duration::seconds(7)), "0:07");
        assert_eq!(format_elapsed(Duration::seconds(-3)), "0:00");
    }

    #[test]
    fn datetime_is_minute_precision() {
        assert_eq!(format_datetime(fixed_now()), "2023-11-14 22:13");
    }
}
