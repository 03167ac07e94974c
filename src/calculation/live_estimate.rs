//! Live pay estimates for employees still clocked in.
//!
//! An open session is measured up to the caller's "now". Nothing is written
//! back: no synthetic clock-out is ever created, so the same snapshot
//! evaluated later simply yields a larger estimate.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::EngineResult;
use crate::models::{ClockEvent, Employee, PayPeriod};

use super::local_time::local_date;
use super::payroll::{PayrollEngine, PayrollOutcome};
use super::session_reconstruction::SessionReconstruction;

/// Returns true when the result depends on a session that is still open.
///
/// That is the case when the employee has an open session and `period`
/// contains the local date of `now`.
pub fn is_provisional<Tz: TimeZone>(
    reconstruction: &SessionReconstruction,
    period: PayPeriod,
    now: DateTime<Utc>,
    tz: &Tz,
) -> bool {
    reconstruction.open_session().is_some() && period.contains_date(local_date(tz, now))
}

/// Estimates pay "as of now" for an employee who is clocked in.
///
/// Returns `Ok(None)` when the employee has no open session or the period
/// does not contain the local date of `now`; use
/// [`PayrollEngine::pay_line`] for settled periods.
///
/// # Errors
///
/// Fails for the same reasons as [`PayrollEngine::pay_line`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{estimate_live_pay, PayrollEngine};
/// use payroll_engine::config::PayPolicy;
/// use payroll_engine::models::{ClockEvent, ClockKind, Employee, NoHolidays, PayPeriod};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy::default();
/// let engine = PayrollEngine::new(Utc, &NoHolidays, &policy);
/// let events = vec![ClockEvent {
///     employee_id: "emp_001".into(),
///     kind: ClockKind::In,
///     timestamp: Utc.with_ymd_and_hms(2026, 1, 14, 9, 0, 0).unwrap(),
///     sequence_hint: 1,
/// }];
/// let employee = Employee::hourly("emp_001", Decimal::new(6000, 0));
/// let period = PayPeriod::single_day(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap());
/// let now = Utc.with_ymd_and_hms(2026, 1, 14, 11, 0, 0).unwrap();
///
/// let estimate = estimate_live_pay(&engine, &employee, &events, period, now).unwrap().unwrap();
/// assert!(estimate.pay_line.is_provisional);
/// assert_eq!(estimate.pay_line.gross_pay, Decimal::new(12_000, 0));
/// ```
pub fn estimate_live_pay<Tz: TimeZone>(
    engine: &PayrollEngine<'_, Tz>,
    employee: &Employee,
    events: &[ClockEvent],
    period: PayPeriod,
    now: DateTime<Utc>,
) -> EngineResult<Option<PayrollOutcome>> {
    let reconstruction = engine.sessions(&employee.id, events);
    if !is_provisional(&reconstruction, period, now, engine.time_zone()) {
        return Ok(None);
    }
    engine.pay_line(employee, events, period, now).map(Some)
}
