//! Clock event model.
//!
//! Clock events arrive already filtered by the upstream geofence and
//! verification gate. The engine only ever reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockKind {
    /// The employee clocked in.
    In,
    /// The employee clocked out.
    Out,
}

impl std::fmt::Display for ClockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockKind::In => write!(f, "In"),
            ClockKind::Out => write!(f, "Out"),
        }
    }
}

/// A single clock-in or clock-out recorded for an employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ClockEvent, ClockKind};
/// use chrono::{TimeZone, Utc};
///
/// let event = ClockEvent {
///     employee_id: "emp_001".to_string(),
///     kind: ClockKind::In,
///     timestamp: Utc.with_ymd_and_hms(2026, 1, 14, 8, 0, 0).unwrap(),
///     sequence_hint: 1,
/// };
/// assert!(event.is_clock_in());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    /// The employee the event belongs to.
    pub employee_id: String,
    /// Whether this is a clock-in or a clock-out.
    pub kind: ClockKind,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Insertion order, used to break ties between identical timestamps.
    #[serde(default)]
    pub sequence_hint: u64,
}

impl ClockEvent {
    /// Returns true for clock-in events.
    pub fn is_clock_in(&self) -> bool {
        self.kind == ClockKind::In
    }

    /// The key events are ordered by.
    pub fn ordering_key(&self) -> (DateTime<Utc>, u64) {
        (self.timestamp, self.sequence_hint)
    }
}

/// Returns one employee's events ordered by `(timestamp, sequence_hint)`.
///
/// Events belonging to other employees are skipped, so a roster-wide snapshot
/// can be passed as is.
pub fn events_for_employee<'a>(events: &'a [ClockEvent], employee_id: &str) -> Vec<&'a ClockEvent> {
    let mut selected: Vec<&ClockEvent> = events
        .iter()
        .filter(|e| e.employee_id == employee_id)
        .collect();
    selected.sort_by_key(|e| e.ordering_key());
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(employee_id: &str, kind: ClockKind, hour: u32, seq: u64) -> ClockEvent {
        ClockEvent {
            employee_id: employee_id.to_string(),
            kind,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 14, hour, 0, 0).unwrap(),
            sequence_hint: seq,
        }
    }

    #[test]
    fn test_events_for_employee_filters_and_sorts() {
        let events = vec![
            event("emp_002", ClockKind::In, 7, 1),
            event("emp_001", ClockKind::Out, 17, 4),
            event("emp_001", ClockKind::In, 8, 2),
        ];

        let selected = events_for_employee(&events, "emp_001");
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].kind, ClockKind::In);
        assert_eq!(selected[1].kind, ClockKind::Out);
    }

    #[test]
    fn test_identical_timestamps_ordered_by_sequence_hint() {
        let events = vec![
            event("emp_001", ClockKind::In, 9, 7),
            event("emp_001", ClockKind::Out, 9, 3),
        ];

        let selected = events_for_employee(&events, "emp_001");
        assert_eq!(selected[0].sequence_hint, 3);
        assert_eq!(selected[1].sequence_hint, 7);
    }

    #[test]
    fn test_clock_event_deserialization() {
        let json = r#"{
            "employee_id": "emp_001",
            "kind": "out",
            "timestamp": "2026-01-14T17:00:00Z"
        }"#;

        let event: ClockEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, ClockKind::Out);
        assert_eq!(event.sequence_hint, 0);
        assert!(!event.is_clock_in());
    }

    #[test]
    fn test_clock_kind_display() {
        assert_eq!(ClockKind::In.to_string(), "In");
        assert_eq!(ClockKind::Out.to_string(), "Out");
    }
}
