//! Session reconstruction from clock events.
//!
//! Pairs clock-ins with clock-outs into [`WorkSession`]s, recovering locally
//! from duplicate clock-ins and orphan clock-outs.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{ClockEvent, ClockKind, Diagnostic, DiagnosticKind, WorkSession};

/// The sessions rebuilt from one employee's events, plus any anomalies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReconstruction {
    /// Sessions ordered by start; only the last one may be open.
    pub sessions: Vec<WorkSession>,
    /// Anomalies encountered while pairing events.
    pub diagnostics: Vec<Diagnostic>,
}

impl SessionReconstruction {
    /// The trailing open session, if the employee is still clocked in.
    pub fn open_session(&self) -> Option<&WorkSession> {
        self.sessions.last().filter(|s| s.is_open())
    }
}

/// Rebuilds work sessions from one employee's events.
///
/// `events` must already be ordered by `(timestamp, sequence_hint)`; see
/// [`events_for_employee`](crate::models::events_for_employee).
///
/// # Pairing rules
///
/// - `In` with no open session opens one.
/// - `In` while a session is open is discarded (the earlier `In` wins) and
///   reported as [`DiagnosticKind::DuplicateClockIn`].
/// - `Out` while a session is open closes it.
/// - `Out` with no open session is discarded and reported as
///   [`DiagnosticKind::OrphanClockOut`].
/// - A session still open at the end of the stream is emitted last with
///   `end = None`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::reconstruct_sessions;
/// use payroll_engine::models::{ClockEvent, ClockKind, DiagnosticKind};
/// use chrono::{TimeZone, Utc};
///
/// let at = |h| Utc.with_ymd_and_hms(2026, 1, 14, h, 0, 0).unwrap();
/// let event = |kind, h, seq| ClockEvent {
///     employee_id: "emp_001".to_string(),
///     kind,
///     timestamp: at(h),
///     sequence_hint: seq,
/// };
/// let events = vec![
///     event(ClockKind::In, 8, 1),
///     event(ClockKind::In, 9, 2),
///     event(ClockKind::Out, 17, 3),
/// ];
///
/// let result = reconstruct_sessions("emp_001", events.iter());
/// assert_eq!(result.sessions.len(), 1);
/// assert_eq!(result.sessions[0].start, at(8));
/// assert_eq!(result.sessions[0].end, Some(at(17)));
/// assert_eq!(result.diagnostics[0].kind, DiagnosticKind::DuplicateClockIn);
/// ```
pub fn reconstruct_sessions<'a, I>(employee_id: &str, events: I) -> SessionReconstruction
where
    I: IntoIterator<Item = &'a ClockEvent>,
{
    let mut result = SessionReconstruction::default();
    let mut open_start: Option<DateTime<Utc>> = None;

    for event in events {
        match (event.kind, open_start) {
            (ClockKind::In, None) => {
                open_start = Some(event.timestamp);
            }
            (ClockKind::In, Some(start)) => {
                debug!(
                    employee_id = %employee_id,
                    open_since = %start,
                    discarded = %event.timestamp,
                    "Discarding duplicate clock-in"
                );
                result.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::DuplicateClockIn,
                        employee_id,
                        format!(
                            "Clock-in at {} ignored; session already open since {}",
                            event.timestamp, start
                        ),
                    )
                    .at(event.timestamp),
                );
            }
            (ClockKind::Out, Some(start)) => {
                result
                    .sessions
                    .push(WorkSession::closed(employee_id, start, event.timestamp));
                open_start = None;
            }
            (ClockKind::Out, None) => {
                debug!(
                    employee_id = %employee_id,
                    discarded = %event.timestamp,
                    "Discarding orphan clock-out"
                );
                result.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::OrphanClockOut,
                        employee_id,
                        format!("Clock-out at {} has no matching clock-in", event.timestamp),
                    )
                    .at(event.timestamp),
                );
            }
        }
    }

    if let Some(start) = open_start {
        result.sessions.push(WorkSession::open(employee_id, start));
    }

    result
}
