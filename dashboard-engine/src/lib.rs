//! Dashboard statistics aggregation engine for CareScribe
//!
//! Computes the operator dashboard numbers (counts, weekly trend, busiest
//! day, top diagnosis, time-saved estimate) for one hospital by a linear scan
//! over its visit records. The computation is a pure function of the input
//! set and the caller's current time: windows ("today", Monday-start week,
//! calendar month) are derived from `now` on every call, never stored, and
//! the engine has no side effects — repeated calls over the same input give
//! identical output.

pub mod stats;
pub mod window;

pub use stats::{
    compute_stats, format_minutes_seconds, DashboardStats, DayCount, StatsConfig, VisitRecord,
    WEEKDAY_LABELS,
};
