//! Day partitioning of work sessions.
//!
//! Splits a session at local midnight boundaries so each calendar day's
//! minutes can be classified on their own. Midnights are resolved in the
//! injected time zone, never the host's.

use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use crate::models::{DaySegment, Diagnostic, DiagnosticKind, HolidayCalendar, WorkSession};

use super::local_time::{local_date, local_midnight};

/// The day segments of one session, plus any anomaly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPartition {
    /// Segments in chronological order, one per local day touched.
    pub segments: Vec<DaySegment>,
    /// Set when the session had no positive duration.
    pub diagnostics: Vec<Diagnostic>,
}

impl DayPartition {
    /// Total minutes across all segments.
    pub fn total_minutes(&self) -> i64 {
        self.segments.iter().map(|s| s.minutes).sum()
    }
}

/// Segments a session by local calendar day.
///
/// # Arguments
///
/// * `session` - The session to partition
/// * `resolved_end` - The instant to treat as the session's end. Callers pass
///   the session's own end, or "now" for an open session.
/// * `tz` - The restaurant's time zone
/// * `holidays` - Decides which local dates are holidays
///
/// # Behavior
///
/// - Each day's share of the session is truncated to whole minutes, so a
///   stray second never becomes a paid minute.
/// - A session within one local day returns a single segment.
/// - A session crossing one or more local midnights returns one segment per
///   day, in order. Days whose share is under a minute get no segment.
/// - A zero-length or negative interval returns no segments and a
///   [`DiagnosticKind::NonPositiveDuration`] diagnostic. A positive session
///   shorter than a minute returns no segments and no diagnostic.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::partition_session;
/// use payroll_engine::models::{NoHolidays, WorkSession};
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 14, 22, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2026, 1, 15, 6, 0, 0).unwrap();
/// let session = WorkSession::closed("emp_001", start, end);
///
/// let partition = partition_session(&session, end, &Utc, &NoHolidays);
/// assert_eq!(partition.segments.len(), 2);
/// assert_eq!(partition.segments[0].minutes, 120);
/// assert_eq!(partition.segments[1].minutes, 360);
/// ```
pub fn partition_session<Tz, H>(
    session: &WorkSession,
    resolved_end: DateTime<Utc>,
    tz: &Tz,
    holidays: &H,
) -> DayPartition
where
    Tz: TimeZone,
    H: HolidayCalendar + ?Sized,
{
    let mut partition = DayPartition::default();
    let start = session.start;
    let end = resolved_end;

    if end <= start {
        debug!(
            employee_id = %session.employee_id,
            start = %session.start,
            end = %resolved_end,
            "Session has no positive duration"
        );
        partition.diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::NonPositiveDuration,
                &session.employee_id,
                format!(
                    "Session starting {} ends at {}, which is not after its start",
                    session.start, resolved_end
                ),
            )
            .at(session.start),
        );
        return partition;
    }

    let mut cursor = start;
    let mut date = local_date(tz, cursor);

    while cursor < end {
        let Some(next_date) = date.succ_opt() else {
            break;
        };
        let next_midnight = local_midnight(tz, next_date);
        let segment_end = next_midnight.min(end);

        if segment_end > cursor {
            let minutes = (segment_end - cursor).num_minutes();
            if minutes > 0 {
                partition.segments.push(DaySegment {
                    date,
                    employee_id: session.employee_id.clone(),
                    start: cursor,
                    end: segment_end,
                    minutes,
                    is_holiday_day: holidays.is_holiday(date),
                });
            }
            cursor = segment_end;
        }

        date = next_date;
    }

    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoHolidays, PublicHoliday};
    use chrono::{FixedOffset, NaiveDate};

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, minute, 0).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn seoul() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    // ==========================================================================
    // DP-001: same-day session returns a single segment
    // ==========================================================================
    #[test]
    fn test_dp_001_same_day_single_segment() {
        let session = WorkSession::closed("emp_001", at(14, 9, 0), at(14, 17, 0));

        let partition = partition_session(&session, at(14, 17, 0), &Utc, &NoHolidays);

        assert_eq!(partition.segments.len(), 1);
        assert_eq!(partition.segments[0].date, date(14));
        assert_eq!(partition.segments[0].minutes, 480);
        assert!(!partition.segments[0].is_holiday_day);
        assert!(partition.diagnostics.is_empty());
    }

    // ==========================================================================
    // DP-002: overnight session splits at midnight
    // ==========================================================================
    #[test]
    fn test_dp_002_overnight_session_two_segments() {
        let session = WorkSession::closed("emp_001", at(14, 22, 0), at(15, 6, 0));

        let partition = partition_session(&session, at(15, 6, 0), &Utc, &NoHolidays);

        assert_eq!(partition.segments.len(), 2);
        assert_eq!(partition.segments[0].date, date(14));
        assert_eq!(partition.segments[0].end, at(15, 0, 0));
        assert_eq!(partition.segments[0].minutes, 120);
        assert_eq!(partition.segments[1].date, date(15));
        assert_eq!(partition.segments[1].start, at(15, 0, 0));
        assert_eq!(partition.segments[1].minutes, 360);
    }

    // ==========================================================================
    // DP-003: multi-day session gets a segment per day
    // ==========================================================================
    #[test]
    fn test_dp_003_multi_day_session() {
        let session = WorkSession::closed("emp_001", at(14, 20, 0), at(16, 2, 0));

        let partition = partition_session(&session, at(16, 2, 0), &Utc, &NoHolidays);

        let minutes: Vec<i64> = partition.segments.iter().map(|s| s.minutes).collect();
        assert_eq!(minutes, vec![240, 1440, 120]);
        assert_eq!(partition.total_minutes(), 30 * 60);
    }

    // ==========================================================================
    // DP-004: zero and negative intervals produce a diagnostic
    // ==========================================================================
    #[test]
    fn test_dp_004_zero_length_session() {
        let session = WorkSession::closed("emp_001", at(14, 9, 0), at(14, 9, 0));

        let partition = partition_session(&session, at(14, 9, 0), &Utc, &NoHolidays);

        assert!(partition.segments.is_empty());
        assert_eq!(partition.diagnostics.len(), 1);
        assert_eq!(
            partition.diagnostics[0].kind,
            DiagnosticKind::NonPositiveDuration
        );
    }

    #[test]
    fn test_dp_004_negative_interval_from_clock_skew() {
        let session = WorkSession::open("emp_001", at(14, 12, 0));

        let partition = partition_session(&session, at(14, 11, 0), &Utc, &NoHolidays);

        assert!(partition.segments.is_empty());
        assert_eq!(
            partition.diagnostics[0].kind,
            DiagnosticKind::NonPositiveDuration
        );
    }

    // ==========================================================================
    // DP-005: midnight is resolved in the injected time zone
    // ==========================================================================
    #[test]
    fn test_dp_005_midnight_in_injected_zone() {
        // 12:00-18:00 UTC is 21:00-03:00 in +09:00, crossing local midnight at 15:00 UTC
        let session = WorkSession::closed("emp_001", at(14, 12, 0), at(14, 18, 0));

        let partition = partition_session(&session, at(14, 18, 0), &seoul(), &NoHolidays);

        assert_eq!(partition.segments.len(), 2);
        assert_eq!(partition.segments[0].date, date(14));
        assert_eq!(partition.segments[0].minutes, 180);
        assert_eq!(partition.segments[1].date, date(15));
        assert_eq!(partition.segments[1].minutes, 180);
    }

    #[test]
    fn test_holiday_flag_set_per_day() {
        let holidays = vec![PublicHoliday {
            date: date(15),
            name: "Test Holiday".to_string(),
        }];
        let session = WorkSession::closed("emp_001", at(14, 22, 0), at(15, 2, 0));

        let partition = partition_session(&session, at(15, 2, 0), &Utc, &holidays);

        assert!(!partition.segments[0].is_holiday_day);
        assert!(partition.segments[1].is_holiday_day);
    }

    #[test]
    fn test_seconds_are_truncated_per_day() {
        let start = Utc.with_ymd_and_hms(2026, 1, 14, 23, 59, 30).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 15, 0, 1, 10).unwrap();
        let session = WorkSession::closed("emp_001", start, end);

        let partition = partition_session(&session, end, &Utc, &NoHolidays);

        // 30s on the 14th is dropped; 70s on the 15th is one minute
        assert_eq!(partition.segments.len(), 1);
        assert_eq!(partition.segments[0].date, date(15));
        assert_eq!(partition.total_minutes(), 1);
        assert!(partition.diagnostics.is_empty());
    }

    #[test]
    fn test_one_extra_second_is_not_a_minute() {
        // 07:00:59 to 15:01:00 is 8h00m01s
        let start = Utc.with_ymd_and_hms(2026, 1, 14, 7, 0, 59).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 14, 15, 1, 0).unwrap();
        let session = WorkSession::closed("emp_001", start, end);

        let partition = partition_session(&session, end, &Utc, &NoHolidays);

        assert_eq!(partition.total_minutes(), 480);
    }

    #[test]
    fn test_sub_minute_session_is_not_clock_skew() {
        let start = Utc.with_ymd_and_hms(2026, 1, 14, 7, 0, 10).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 14, 7, 0, 50).unwrap();
        let session = WorkSession::closed("emp_001", start, end);

        let partition = partition_session(&session, end, &Utc, &NoHolidays);

        assert!(partition.segments.is_empty());
        assert!(partition.diagnostics.is_empty());
    }

    #[test]
    fn test_open_session_uses_supplied_end() {
        let session = WorkSession::open("emp_001", at(14, 8, 0));

        let partition = partition_session(&session, at(14, 10, 30), &Utc, &NoHolidays);

        assert_eq!(partition.total_minutes(), 150);
    }
}
