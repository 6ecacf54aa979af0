use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::window::{
    previous_week_window, this_month_window, this_week_window, today_window,
};

/// Weekday labels for the weekly buckets, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One visit as the aggregation engine sees it. Callers hand in the sessions
/// of a single hospital, optionally pre-filtered to a date range.
#[derive(Debug, Clone)]
pub struct VisitRecord {
    pub created_at: DateTime<Utc>,
    pub duration_seconds: Option<u32>,
    pub diagnosis: Option<String>,
}

/// Tuning inputs for derived metrics.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Assumed manual charting time per visit, in minutes, used for the
    /// time-saved estimate.
    pub baseline_charting_minutes: f64,
    /// Externally measured model accuracy, passed through untouched.
    pub accuracy_percent: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            baseline_charting_minutes: 15.0,
            accuracy_percent: 0.0,
        }
    }
}

/// Per-day visit count for the current week.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DayCount {
    pub day: String,
    pub count: u32,
}

/// Aggregated dashboard statistics for one hospital.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub today_count: u32,
    pub week_count: u32,
    pub month_count: u32,
    /// Mean recording duration over the input set, in seconds.
    pub avg_duration_seconds: u32,
    /// `avg_duration_seconds` rendered as `M:SS`.
    pub avg_duration_formatted: String,
    /// Visit counts for Monday through Sunday of the current week.
    pub weekly_data: Vec<DayCount>,
    /// Weekday label with the most visits this week; ties pick the earliest
    /// weekday. `None` when the week has no visits.
    pub busiest_day: Option<String>,
    /// Signed percentage change of this week's count against the previous
    /// Monday-start week, e.g. `"+50%"`. Never NaN or infinite.
    pub week_change: String,
    /// Most frequent non-empty diagnosis this week; ties broken by the most
    /// recent occurrence.
    pub top_diagnosis: Option<String>,
    pub time_saved_hours: f64,
    pub time_saved_percent: f64,
    pub accuracy_percent: f64,
}

/// Render a duration in seconds as `M:SS` (e.g. `"4:05"`).
pub fn format_minutes_seconds(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Compute dashboard statistics over `visits` as of `now`.
///
/// Pure and side-effect-free: a linear scan plus group-bys, no stored state.
pub fn compute_stats(visits: &[VisitRecord], now: DateTime<Utc>, config: &StatsConfig) -> DashboardStats {
    let today = today_window(now);
    let week = this_week_window(now);
    let previous_week = previous_week_window(now);
    let month = this_month_window(now);

    let mut today_count = 0u32;
    let mut week_count = 0u32;
    let mut previous_week_count = 0u32;
    let mut month_count = 0u32;
    let mut weekday_counts = [0u32; 7];
    let mut duration_sum = 0u64;
    let mut duration_samples = 0u64;
    // diagnosis -> (occurrences this week, most recent occurrence)
    let mut diagnoses: HashMap<&str, (u32, DateTime<Utc>)> = HashMap::new();

    for visit in visits {
        if today.contains(visit.created_at) {
            today_count += 1;
        }
        if month.contains(visit.created_at) {
            month_count += 1;
        }
        if previous_week.contains(visit.created_at) {
            previous_week_count += 1;
        }
        if week.contains(visit.created_at) {
            week_count += 1;
            let weekday = visit.created_at.date_naive().weekday().num_days_from_monday() as usize;
            if let Some(slot) = weekday_counts.get_mut(weekday) {
                *slot += 1;
            }
            if let Some(diagnosis) = visit.diagnosis.as_deref() {
                if !diagnosis.trim().is_empty() {
                    let entry = diagnoses.entry(diagnosis).or_insert((0, visit.created_at));
                    entry.0 += 1;
                    if visit.created_at > entry.1 {
                        entry.1 = visit.created_at;
                    }
                }
            }
        }
        if let Some(duration) = visit.duration_seconds {
            duration_sum += u64::from(duration);
            duration_samples += 1;
        }
    }

    let avg_duration_seconds = if duration_samples > 0 {
        (duration_sum / duration_samples) as u32
    } else {
        0
    };

    let weekly_data = WEEKDAY_LABELS
        .iter()
        .zip(weekday_counts.iter())
        .map(|(day, count)| DayCount {
            day: (*day).to_string(),
            count: *count,
        })
        .collect();

    let busiest_day = busiest_day(&weekday_counts);
    let week_change = week_change(previous_week_count, week_count);
    let top_diagnosis = top_diagnosis(&diagnoses);

    let baseline_seconds = config.baseline_charting_minutes * 60.0;
    let saved_per_visit = (baseline_seconds - f64::from(avg_duration_seconds)).max(0.0);
    let time_saved_hours = saved_per_visit * f64::from(month_count) / 3600.0;
    let time_saved_percent = if baseline_seconds > 0.0 {
        (saved_per_visit / baseline_seconds * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    DashboardStats {
        today_count,
        week_count,
        month_count,
        avg_duration_seconds,
        avg_duration_formatted: format_minutes_seconds(avg_duration_seconds),
        weekly_data,
        busiest_day,
        week_change,
        top_diagnosis,
        time_saved_hours,
        time_saved_percent,
        accuracy_percent: config.accuracy_percent,
    }
}

/// Earliest weekday carrying the week's maximum count.
fn busiest_day(weekday_counts: &[u32; 7]) -> Option<String> {
    let max = *weekday_counts.iter().max()?;
    if max == 0 {
        return None;
    }
    weekday_counts
        .iter()
        .position(|&c| c == max)
        .and_then(|i| WEEKDAY_LABELS.get(i))
        .map(|day| (*day).to_string())
}

/// Signed percent change, guarded against a zero baseline.
fn week_change(previous: u32, current: u32) -> String {
    if previous == 0 {
        return if current == 0 {
            "+0%".to_string()
        } else {
            "+100%".to_string()
        };
    }
    let change = (f64::from(current) - f64::from(previous)) / f64::from(previous) * 100.0;
    let rounded = change.round() as i64;
    if rounded >= 0 {
        format!("+{}%", rounded)
    } else {
        format!("{}%", rounded)
    }
}

fn top_diagnosis(diagnoses: &HashMap<&str, (u32, DateTime<Utc>)>) -> Option<String> {
    diagnoses
        .iter()
        .max_by_key(|(_, (count, latest))| (*count, *latest))
        .map(|(diagnosis, _)| (*diagnosis).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // 2025-03-12 is a Wednesday; the week runs 03-10 (Mon) to 03-16 (Sun).
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 12, 15, 0, 0).unwrap()
    }

    fn visit(at: DateTime<Utc>) -> VisitRecord {
        VisitRecord {
            created_at: at,
            duration_seconds: Some(180),
            diagnosis: None,
        }
    }

    fn day(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn counts_split_into_windows() {
        let visits = vec![
            visit(day(12, 9)),  // today
            visit(day(10, 9)),  // Monday this week
            visit(day(5, 9)),   // last week, same month
            visit(day(1, 9)),   // this month only
        ];
        let stats = compute_stats(&visits, now(), &StatsConfig::default());
        assert_eq!(stats.today_count, 1);
        assert_eq!(stats.week_count, 2);
        assert_eq!(stats.month_count, 4);
    }

    #[test]
    fn three_vs_two_is_plus_fifty_percent() {
        // Mon/Wed/Fri this week, two last week.
        let visits = vec![
            visit(day(10, 9)),
            visit(day(12, 9)),
            visit(day(14, 9)),
            visit(day(4, 9)),
            visit(day(6, 9)),
        ];
        let stats = compute_stats(&visits, now(), &StatsConfig::default());
        assert_eq!(stats.week_change, "+50%");
    }

    #[test]
    fn week_change_zero_baseline_never_divides() {
        let stats = compute_stats(&[], now(), &StatsConfig::default());
        assert_eq!(stats.week_change, "+0%");

        let stats = compute_stats(&[visit(day(12, 9))], now(), &StatsConfig::default());
        assert_eq!(stats.week_change, "+100%");
    }

    #[test]
    fn week_change_is_signed_when_shrinking() {
        let visits = vec![
            visit(day(12, 9)), // one this week
            visit(day(4, 9)),
            visit(day(5, 9)),
            visit(day(6, 9)),
            visit(day(7, 9)), // four last week
        ];
        let stats = compute_stats(&visits, now(), &StatsConfig::default());
        assert_eq!(stats.week_change, "-75%");
    }

    #[test]
    fn weekly_buckets_are_monday_first() {
        let visits = vec![visit(day(10, 9)), visit(day(10, 11)), visit(day(16, 9))];
        let stats = compute_stats(&visits, now(), &StatsConfig::default());
        assert_eq!(stats.weekly_data.len(), 7);
        assert_eq!(stats.weekly_data[0].day, "Mon");
        assert_eq!(stats.weekly_data[0].count, 2);
        assert_eq!(stats.weekly_data[6].day, "Sun");
        assert_eq!(stats.weekly_data[6].count, 1);
    }

    #[test]
    fn busiest_day_tie_breaks_to_earliest_weekday() {
        let visits = vec![visit(day(12, 9)), visit(day(10, 9))]; // Wed and Mon, tied
        let stats = compute_stats(&visits, now(), &StatsConfig::default());
        assert_eq!(stats.busiest_day.as_deref(), Some("Mon"));
    }

    #[test]
    fn busiest_day_absent_for_empty_week() {
        let stats = compute_stats(&[], now(), &StatsConfig::default());
        assert_eq!(stats.busiest_day, None);
    }

    #[test]
    fn top_diagnosis_by_frequency_then_recency() {
        let mut visits = vec![];
        for (d, h, diagnosis) in [
            (10, 9, "URI"),
            (11, 9, "Gastritis"),
            (11, 10, "URI"),
            (12, 9, "Gastritis"),
        ] {
            visits.push(VisitRecord {
                created_at: day(d, h),
                duration_seconds: None,
                diagnosis: Some(diagnosis.to_string()),
            });
        }
        // Tied 2-2; Gastritis occurred most recently.
        let stats = compute_stats(&visits, now(), &StatsConfig::default());
        assert_eq!(stats.top_diagnosis.as_deref(), Some("Gastritis"));
    }

    #[test]
    fn empty_diagnoses_are_ignored() {
        let visits = vec![
            VisitRecord {
                created_at: day(12, 9),
                duration_seconds: None,
                diagnosis: Some("  ".to_string()),
            },
            VisitRecord {
                created_at: day(12, 10),
                duration_seconds: None,
                diagnosis: None,
            },
        ];
        let stats = compute_stats(&visits, now(), &StatsConfig::default());
        assert_eq!(stats.top_diagnosis, None);
    }

    #[test]
    fn average_duration_formats_as_minutes_seconds() {
        let visits = vec![
            VisitRecord {
                created_at: day(12, 9),
                duration_seconds: Some(245),
                diagnosis: None,
            },
            VisitRecord {
                created_at: day(12, 10),
                duration_seconds: Some(255),
                diagnosis: None,
            },
        ];
        let stats = compute_stats(&visits, now(), &StatsConfig::default());
        assert_eq!(stats.avg_duration_seconds, 250);
        assert_eq!(stats.avg_duration_formatted, "4:10");
    }

    #[test]
    fn time_saved_clamps_at_zero() {
        let config = StatsConfig {
            baseline_charting_minutes: 1.0,
            accuracy_percent: 99.0,
        };
        let visits = vec![VisitRecord {
            created_at: day(12, 9),
            duration_seconds: Some(600), // longer than the 1 minute baseline
            diagnosis: None,
        }];
        let stats = compute_stats(&visits, now(), &config);
        assert_eq!(stats.time_saved_hours, 0.0);
        assert_eq!(stats.time_saved_percent, 0.0);
        assert_eq!(stats.accuracy_percent, 99.0);
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        let visits = vec![visit(day(12, 9)), visit(day(10, 9))];
        let first = compute_stats(&visits, now(), &StatsConfig::default());
        let second = compute_stats(&visits, now(), &StatsConfig::default());
        assert_eq!(serde_json::to_value(&first).unwrap(), serde_json::to_value(&second).unwrap());
    }

    #[test]
    fn monday_boundary_excludes_previous_sunday() {
        let monday_morning = Utc.with_ymd_and_hms(2025, 3, 10, 0, 30, 0).unwrap();
        let sunday_visit = visit(day(9, 23));
        let stats = compute_stats(&[sunday_visit], monday_morning, &StatsConfig::default());
        assert_eq!(stats.week_count, 0);
    }
}
