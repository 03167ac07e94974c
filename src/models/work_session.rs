//! Work session and day segment models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One continuous paired clock-in/clock-out interval, or an open one.
///
/// # Example
///
/// ```
/// use payroll_engine::models::WorkSession;
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 14, 8, 0, 0).unwrap();
/// let open = WorkSession::open("emp_001", start);
/// assert!(open.is_open());
///
/// let now = Utc.with_ymd_and_hms(2026, 1, 14, 10, 0, 0).unwrap();
/// assert_eq!(open.resolved_end(now), now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// The employee who worked the session.
    pub employee_id: String,
    /// When the session started.
    pub start: DateTime<Utc>,
    /// When the session ended, or `None` while the employee is clocked in.
    pub end: Option<DateTime<Utc>>,
    /// True once a matching clock-out closed the session.
    pub complete: bool,
}

impl WorkSession {
    /// Creates a session closed by a clock-out.
    pub fn closed(employee_id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            employee_id: employee_id.into(),
            start,
            end: Some(end),
            complete: true,
        }
    }

    /// Creates a session that has not been clocked out yet.
    pub fn open(employee_id: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            employee_id: employee_id.into(),
            start,
            end: None,
            complete: false,
        }
    }

    /// Returns true while the session has no clock-out.
    pub fn is_open(&self) -> bool {
        !self.complete
    }

    /// The instant the session is evaluated up to.
    ///
    /// Closed sessions use their own end; open sessions use the supplied
    /// evaluation instant.
    pub fn resolved_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.end.unwrap_or(now)
    }
}

/// The part of one work session that falls within one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySegment {
    /// The local calendar date of this segment.
    pub date: NaiveDate,
    /// The employee who worked the segment.
    pub employee_id: String,
    /// Segment start (inclusive).
    pub start: DateTime<Utc>,
    /// Segment end (exclusive).
    pub end: DateTime<Utc>,
    /// Whole minutes worked within the day.
    pub minutes: i64,
    /// Whether `date` is a holiday.
    pub is_holiday_day: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 14, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_closed_session_resolves_to_own_end() {
        let session = WorkSession::closed("emp_001", at(8), at(17));
        assert!(session.complete);
        assert!(!session.is_open());
        assert_eq!(session.resolved_end(at(20)), at(17));
    }

    #[test]
    fn test_open_session_resolves_to_now() {
        let session = WorkSession::open("emp_001", at(8));
        assert!(session.is_open());
        assert_eq!(session.end, None);
        assert_eq!(session.resolved_end(at(11)), at(11));
    }

    #[test]
    fn test_day_segment_serialization() {
        let segment = DaySegment {
            date: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
            employee_id: "emp_001".to_string(),
            start: at(8),
            end: at(9),
            minutes: 60,
            is_holiday_day: false,
        };

        let json = serde_json::to_string(&segment).unwrap();
        assert!(json.contains("\"date\":\"2026-01-14\""));
        assert!(json.contains("\"minutes\":60"));

        let deserialized: DaySegment = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, segment);
    }
}
