//! Local wall-clock helpers.
//!
//! Every conversion between UTC instants and restaurant-local wall-clock time
//! goes through these functions, with the time zone passed explicitly.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// How far forward to search when a local time falls in a DST gap.
const MAX_GAP_SEARCH_MINUTES: i64 = 3 * 60;

/// Local wall-clock time at `hour:00` on `date`.
pub(crate) fn wall_clock(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default())
}

/// The local calendar date of an instant.
pub(crate) fn local_date<Tz: TimeZone>(tz: &Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Resolves a local wall-clock time to a UTC instant.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times
/// inside a DST gap resolve to the first valid minute after the gap.
pub(crate) fn local_to_utc<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    let mut candidate = local;
    let mut skipped = 0;
    while skipped <= MAX_GAP_SEARCH_MINUTES {
        if let Some(resolved) = tz.from_local_datetime(&candidate).earliest() {
            return resolved.with_timezone(&Utc);
        }
        candidate += Duration::minutes(1);
        skipped += 1;
    }
    Utc.from_utc_datetime(&local)
}

/// The UTC instant of local midnight starting `date`.
pub(crate) fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    local_to_utc(tz, wall_clock(date, 0))
}

/// Whole minutes shared by `[a_start, a_end)` and `[b_start, b_end)`.
pub(crate) fn overlap_minutes(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> i64 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    if end > start {
        (end - start).num_minutes()
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn seoul() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_local_midnight_in_fixed_offset() {
        // 2026-01-14 00:00 +09:00 is 2026-01-13 15:00 UTC
        let midnight = local_midnight(&seoul(), date(2026, 1, 14));
        assert_eq!(midnight, Utc.with_ymd_and_hms(2026, 1, 13, 15, 0, 0).unwrap());
    }

    #[test]
    fn test_local_date_uses_injected_zone() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 13, 16, 0, 0).unwrap();
        assert_eq!(local_date(&seoul(), instant), date(2026, 1, 14));
        assert_eq!(local_date(&Utc, instant), date(2026, 1, 13));
    }

    #[test]
    fn test_overlap_minutes() {
        let t = |h| Utc.with_ymd_and_hms(2026, 1, 14, h, 0, 0).unwrap();
        assert_eq!(overlap_minutes(t(8), t(19), t(18), t(23)), 60);
        assert_eq!(overlap_minutes(t(8), t(10), t(12), t(14)), 0);
        assert_eq!(overlap_minutes(t(8), t(10), t(0), t(23)), 120);
    }

    #[test]
    fn test_wall_clock() {
        let wall = wall_clock(date(2026, 1, 14), 18);
        assert_eq!(wall.to_string(), "2026-01-14 18:00:00");
    }
}
