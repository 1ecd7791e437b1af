//! Time source and viewer time zone.
//!
//! # Responsibility
//! - Provide "now" for id generation, default deadlines and classification.
//! - Resolve the viewer's local day boundaries and display zone.
//!
//! # Invariants
//! - All instants leaving this module are UTC.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveTime, Offset, TimeZone, Utc};
use std::fmt::Display;

/// Clock plus the time zone the user sees.
pub trait Clock {
    type Zone: TimeZone<Offset = Self::ZoneOffset>;
    type ZoneOffset: Offset + Display;

    fn now(&self) -> DateTime<Utc>;
    fn zone(&self) -> Self::Zone;
}

/// Wall clock in the process-local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Zone = Local;
    type ZoneOffset = FixedOffset;

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn zone(&self) -> Local {
        Local
    }
}

/// Frozen clock with an explicit offset, for deterministic callers.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn set(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }
}

impl Clock for FixedClock {
    type Zone = FixedOffset;
    type ZoneOffset = FixedOffset;

    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn zone(&self) -> FixedOffset {
        self.offset
    }
}

/// Returns 23:59:00 of the local calendar day containing `at`, as UTC.
///
/// Falls back to the earliest mapping when 23:59 is ambiguous, and to the
/// UTC reading of the local wall time when it does not exist at all.
pub fn end_of_local_day<Tz: TimeZone>(at: DateTime<Utc>, zone: &Tz) -> DateTime<Utc> {
    let local_day = at.with_timezone(zone).date_naive();
    let end_of_day = local_day.and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN));
    match zone.from_local_datetime(&end_of_day).earliest() {
        Some(value) => value.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&end_of_day),
    }
}

#[cfg(test)]
mod tests {
    use super::{end_of_local_day, Clock, FixedClock};
    use chrono::{Duration, FixedOffset, TimeZone, Utc};

    #[test]
    fn end_of_local_day_uses_local_calendar_day() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        // 2026-03-01 20:00 UTC is already 2026-03-02 05:00 in UTC+9.
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap();
        let deadline = end_of_local_day(at, &tokyo);
        assert_eq!(deadline, Utc.with_ymd_and_hms(2026, 3, 2, 14, 59, 0).unwrap());
    }

    #[test]
    fn fixed_clock_advances() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let mut clock = FixedClock::utc(start);
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), start + Duration::minutes(5));
    }
}
