//! Deadline urgency buckets.

use chrono::{DateTime, Utc};
use serde::Serialize;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const URGENT_HOURS: f64 = 24.0;
const UPCOMING_HOURS: f64 = 72.0;

/// Urgency derived from time left until the deadline. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityClass {
    Overdue,
    Urgent,
    Upcoming,
    Relaxed,
}

impl PriorityClass {
    /// Style class name used by row renderers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Urgent => "urgent",
            Self::Upcoming => "upcoming",
            Self::Relaxed => "relaxed",
        }
    }
}

/// Classifies `deadline` as observed at `now`.
///
/// Thresholds use strict `<`: exactly 24h left is `Upcoming`, exactly 72h
/// left is `Relaxed`, exactly 0 left is `Urgent`.
pub fn classify(deadline: DateTime<Utc>, now: DateTime<Utc>) -> PriorityClass {
    let hours_until = (deadline - now).num_milliseconds() as f64 / MILLIS_PER_HOUR;
    if hours_until < 0.0 {
        PriorityClass::Overdue
    } else if hours_until < URGENT_HOURS {
        PriorityClass::Urgent
    } else if hours_until < UPCOMING_HOURS {
        PriorityClass::Upcoming
    } else {
        PriorityClass::Relaxed
    }
}
