use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

/// Half-open date range [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let date = at.date_naive();
        date >= self.start && date < self.end
    }
}

/// The single day containing `now`.
pub fn today_window(now: DateTime<Utc>) -> DateWindow {
    let start = now.date_naive();
    DateWindow {
        start,
        end: start + Duration::days(1),
    }
}

/// The Monday-start week containing `now`.
pub fn this_week_window(now: DateTime<Utc>) -> DateWindow {
    let start = week_start(now.date_naive());
    DateWindow {
        start,
        end: start + Duration::days(7),
    }
}

/// The Monday-start week immediately before the one containing `now`.
pub fn previous_week_window(now: DateTime<Utc>) -> DateWindow {
    let this_week = this_week_window(now);
    DateWindow {
        start: this_week.start - Duration::days(7),
        end: this_week.start,
    }
}

/// The calendar month containing `now`.
pub fn this_month_window(now: DateTime<Utc>) -> DateWindow {
    let date = now.date_naive();
    // First day of this month and of the next; with_day(1) cannot fail for 1.
    let start = date.with_day(1).unwrap_or(date);
    let end = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap_or(start)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1).unwrap_or(start)
    };
    DateWindow { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn week_starts_on_monday() {
        // 2025-03-12 is a Wednesday.
        let wed = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        assert_eq!(week_start(wed), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        // Monday maps to itself, Sunday to the previous Monday.
        let mon = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let sun = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
        assert_eq!(week_start(mon), mon);
        assert_eq!(week_start(sun), mon);
    }

    #[test]
    fn month_window_handles_december() {
        let now = Utc.with_ymd_and_hms(2025, 12, 15, 12, 0, 0).unwrap();
        let window = this_month_window(now);
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn previous_week_abuts_current_week() {
        let now = Utc.with_ymd_and_hms(2025, 3, 12, 8, 0, 0).unwrap();
        let previous = previous_week_window(now);
        let current = this_week_window(now);
        assert_eq!(previous.end, current.start);
        assert_eq!(previous.start, current.start - Duration::days(7));
    }
}
