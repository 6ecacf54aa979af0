use chrono::{DateTime, Duration, Utc};

/// Label rendered once a transcript's window has elapsed. Shown instead of
/// `00:00:00`, which would imply the data still exists.
pub const EXPIRED_LABEL: &str = "Expired";

/// Seconds until a transcription created at `created_at` under a window of
/// `retention_hours` must be deleted, evaluated at `now`. Never negative;
/// exactly 0 from `created_at + retention_hours` onward.
pub fn seconds_until_deletion(
    created_at: DateTime<Utc>,
    retention_hours: u32,
    now: DateTime<Utc>,
) -> i64 {
    let deadline = created_at + Duration::hours(i64::from(retention_hours));
    (deadline - now).num_seconds().max(0)
}

/// Whether the retention window has fully elapsed at `now`.
pub fn is_expired(created_at: DateTime<Utc>, retention_hours: u32, now: DateTime<Utc>) -> bool {
    seconds_until_deletion(created_at, retention_hours, now) == 0
}

/// Render a remaining-seconds value as a zero-padded `HH:MM:SS` countdown,
/// or the explicit expired label when nothing remains.
pub fn format_countdown(seconds_remaining: i64) -> String {
    if seconds_remaining <= 0 {
        return EXPIRED_LABEL.to_string();
    }
    let hours = seconds_remaining / 3600;
    let minutes = (seconds_remaining % 3600) / 60;
    let seconds = seconds_remaining % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn full_window_remains_at_creation() {
        assert_eq!(seconds_until_deletion(t0(), 24, t0()), 24 * 3600);
    }

    #[test]
    fn one_hour_remains_at_twenty_three_hours() {
        let now = t0() + Duration::hours(23);
        let remaining = seconds_until_deletion(t0(), 24, now);
        assert_eq!(remaining, 3600);
        assert_eq!(format_countdown(remaining), "01:00:00");
    }

    #[test]
    fn zero_at_deadline_and_after() {
        let deadline = t0() + Duration::hours(24);
        assert_eq!(seconds_until_deletion(t0(), 24, deadline), 0);
        assert_eq!(seconds_until_deletion(t0(), 24, deadline + Duration::days(400)), 0);
        assert!(is_expired(t0(), 24, deadline));
    }

    #[test]
    fn monotonically_non_increasing() {
        let mut previous = i64::MAX;
        for minutes in (0..=25 * 60).step_by(7) {
            let remaining = seconds_until_deletion(t0(), 24, t0() + Duration::minutes(minutes));
            assert!(remaining >= 0);
            assert!(remaining <= previous);
            previous = remaining;
        }
    }

    #[test]
    fn zero_hour_window_expires_immediately() {
        assert!(is_expired(t0(), 0, t0()));
        assert_eq!(seconds_until_deletion(t0(), 0, t0()), 0);
    }

    #[test]
    fn countdown_is_zero_padded() {
        assert_eq!(format_countdown(3661), "01:01:01");
        assert_eq!(format_countdown(59), "00:00:59");
        assert_eq!(format_countdown(30 * 24 * 3600), "720:00:00");
    }

    #[test]
    fn expired_renders_label_not_zeros() {
        assert_eq!(format_countdown(0), EXPIRED_LABEL);
        assert_eq!(format_countdown(-5), EXPIRED_LABEL);
    }
}
