//! The payroll pipeline.
//!
//! [`PayrollEngine`] runs session reconstruction, day partitioning, bucket
//! allocation, wage calculation, deductions and period aggregation over an
//! immutable snapshot of clock events. It holds no mutable state and never
//! reads the clock: callers pass the evaluation instant.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PayPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, ClockEvent, DailyPay, DaySegment, Diagnostic, DiagnosticKind, Employee,
    HolidayCalendar, PayLine, PayPeriod, RosterSummary, WorkSession, events_for_employee,
};

use super::bucket_allocation::{allocate_by_day, allocation_audit_step};
use super::day_partition::partition_session;
use super::deductions::{Deductions, deductions_audit_step};
use super::live_estimate::is_provisional;
use super::period_aggregation::{aggregate_pay_line, summarize_roster};
use super::session_reconstruction::{SessionReconstruction, reconstruct_sessions};
use super::wage::{calculate_daily_pay, gross_pay_audit_step, resolve_hourly_rate};

/// Everything computed for one employee over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollOutcome {
    /// The aggregated pay line.
    pub pay_line: PayLine,
    /// Per-day breakdown of worked days within the period.
    pub daily: Vec<DailyPay>,
    /// Every session rebuilt from the employee's events.
    pub sessions: Vec<WorkSession>,
    /// Non-fatal anomalies found along the way.
    pub diagnostics: Vec<Diagnostic>,
    /// Ordered record of each rule applied.
    pub audit_trace: AuditTrace,
}

/// Pay lines and totals for a roster over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterOutcome {
    /// Totals across the roster.
    pub summary: RosterSummary,
    /// One pay line per employee, in roster order.
    pub pay_lines: Vec<PayLine>,
    /// Diagnostics from every employee.
    pub diagnostics: Vec<Diagnostic>,
}

/// Computes pay for one restaurant.
///
/// The engine borrows its holiday calendar and pay policy and owns only the
/// time zone, so it is cheap to build per request.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PayrollEngine;
/// use payroll_engine::config::PayPolicy;
/// use payroll_engine::models::{ClockEvent, ClockKind, Employee, NoHolidays, PayPeriod};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy::default();
/// let engine = PayrollEngine::new(Utc, &NoHolidays, &policy);
///
/// let at = |h| Utc.with_ymd_and_hms(2026, 1, 14, h, 0, 0).unwrap();
/// let events = vec![
///     ClockEvent { employee_id: "emp_001".into(), kind: ClockKind::In, timestamp: at(8), sequence_hint: 1 },
///     ClockEvent { employee_id: "emp_001".into(), kind: ClockKind::Out, timestamp: at(19), sequence_hint: 2 },
/// ];
/// let employee = Employee::hourly("emp_001", Decimal::new(5000, 0));
/// let period = PayPeriod::single_day(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap());
///
/// let outcome = engine.pay_line(&employee, &events, period, at(20)).unwrap();
/// assert_eq!(outcome.pay_line.gross_pay, Decimal::new(59_250, 0));
/// assert_eq!(outcome.pay_line.net_pay, Decimal::new(54_510, 0));
/// ```
pub struct PayrollEngine<'a, Tz: TimeZone> {
    tz: Tz,
    holidays: &'a dyn HolidayCalendar,
    policy: &'a PayPolicy,
}

impl<'a, Tz: TimeZone> PayrollEngine<'a, Tz> {
    /// Creates an engine for one time zone, holiday calendar and pay policy.
    pub fn new(tz: Tz, holidays: &'a dyn HolidayCalendar, policy: &'a PayPolicy) -> Self {
        Self {
            tz,
            holidays,
            policy,
        }
    }

    /// The restaurant time zone.
    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    /// Rebuilds an employee's sessions from a mixed event snapshot.
    pub fn sessions(&self, employee_id: &str, events: &[ClockEvent]) -> SessionReconstruction {
        let ordered = events_for_employee(events, employee_id);
        reconstruct_sessions(employee_id, ordered.iter().copied())
    }

    /// Computes one employee's pay line for a period as of `now`.
    ///
    /// Events for other employees are ignored. A still-open session is
    /// measured up to `now`, and the line is provisional when the period
    /// contains the local date of `now`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidWageRate` for a zero or negative rate or
    /// salary, and `EngineError::PayOverflow` when amounts leave the decimal
    /// range.
    pub fn pay_line(
        &self,
        employee: &Employee,
        events: &[ClockEvent],
        period: PayPeriod,
        now: DateTime<Utc>,
    ) -> EngineResult<PayrollOutcome> {
        let ordered = events_for_employee(events, &employee.id);
        self.compute(employee, &ordered, period, now)
    }

    /// Computes pay lines and totals for every employee in `employees`.
    ///
    /// Events belonging to employees outside the roster are ignored.
    ///
    /// # Errors
    ///
    /// Fails on the first employee whose pay line fails, as
    /// [`PayrollEngine::pay_line`] does, or when roster totals overflow.
    pub fn roster_summary(
        &self,
        employees: &[Employee],
        events: &[ClockEvent],
        period: PayPeriod,
        now: DateTime<Utc>,
    ) -> EngineResult<RosterOutcome> {
        let mut by_employee: HashMap<&str, Vec<&ClockEvent>> = HashMap::new();
        for event in events {
            by_employee
                .entry(event.employee_id.as_str())
                .or_default()
                .push(event);
        }

        let mut pay_lines = Vec::with_capacity(employees.len());
        let mut diagnostics = Vec::new();

        for employee in employees {
            let mut own = by_employee
                .get(employee.id.as_str())
                .cloned()
                .unwrap_or_default();
            own.sort_by_key(|e| e.ordering_key());

            let outcome = self.compute(employee, &own, period, now)?;
            pay_lines.push(outcome.pay_line);
            diagnostics.extend(outcome.diagnostics);
        }

        // Net and deductions never exceed gross, so a gross total that fits
        // bounds every other total.
        let gross_total = pay_lines
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.gross_pay));
        if gross_total.is_none() {
            return Err(EngineError::RosterOverflow {
                employee_count: pay_lines.len(),
            });
        }

        Ok(RosterOutcome {
            summary: summarize_roster(period, &pay_lines),
            pay_lines,
            diagnostics,
        })
    }

    /// Runs the pipeline over one employee's ordered events.
    fn compute(
        &self,
        employee: &Employee,
        ordered: &[&ClockEvent],
        period: PayPeriod,
        now: DateTime<Utc>,
    ) -> EngineResult<PayrollOutcome> {
        employee.validate_wage()?;
        let mut audit_trace = AuditTrace::default();

        let reconstruction = reconstruct_sessions(&employee.id, ordered.iter().copied());
        let mut diagnostics = reconstruction.diagnostics.clone();

        let rate = resolve_hourly_rate(
            employee,
            self.policy.default_hourly_rate,
            audit_trace.next_step_number(),
        );
        diagnostics.extend(rate.diagnostic);
        audit_trace.push(rate.audit_step);

        let mut segments: Vec<DaySegment> = Vec::new();
        for session in &reconstruction.sessions {
            let partition =
                partition_session(session, session.resolved_end(now), &self.tz, self.holidays);
            diagnostics.extend(partition.diagnostics);
            segments.extend(
                partition
                    .segments
                    .into_iter()
                    .filter(|s| period.contains_date(s.date)),
            );
        }

        let mut daily = Vec::new();
        for (date, buckets) in allocate_by_day(&segments, &self.tz) {
            let is_holiday = self.holidays.is_holiday(date);
            audit_trace.push(allocation_audit_step(
                date,
                is_holiday,
                &buckets,
                audit_trace.next_step_number(),
            ));

            let day = calculate_daily_pay(date, is_holiday, buckets, rate.rate, &self.policy.multipliers)
                .ok_or_else(|| overflow(employee, rate.rate))?;
            audit_trace.push(gross_pay_audit_step(
                &day,
                rate.rate,
                &self.policy.multipliers,
                audit_trace.next_step_number(),
            ));
            daily.push(day);
        }

        daily
            .iter()
            .try_fold(Decimal::ZERO, |total, day| total.checked_add(day.gross_pay))
            .ok_or_else(|| overflow(employee, rate.rate))?;

        let provisional = is_provisional(&reconstruction, period, now, &self.tz);
        let pay_line = aggregate_pay_line(
            &employee.id,
            period,
            rate.rate,
            &daily,
            &self.policy.deductions,
            provisional,
        );

        if pay_line.buckets.is_empty() {
            debug!(
                employee_id = %employee.id,
                start = %period.start_date,
                end = %period.end_date,
                "No worked minutes in period"
            );
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::EmptyPeriod,
                &employee.id,
                format!(
                    "No worked minutes between {} and {}",
                    period.start_date, period.end_date
                ),
            ));
        } else {
            let deductions = Deductions {
                health: pay_line.health_deduction,
                pension: pay_line.pension_deduction,
                net_pay: pay_line.net_pay,
            };
            audit_trace.push(deductions_audit_step(
                pay_line.gross_pay,
                &self.policy.deductions,
                &deductions,
                audit_trace.next_step_number(),
            ));
        }

        Ok(PayrollOutcome {
            pay_line,
            daily,
            sessions: reconstruction.sessions,
            diagnostics,
            audit_trace,
        })
    }
}

fn overflow(employee: &Employee, hourly_rate: Decimal) -> EngineError {
    debug!(employee_id = %employee.id, hourly_rate = %hourly_rate, "Pay amount overflowed");
    EngineError::PayOverflow {
        employee_id: employee.id.clone(),
        hourly_rate,
    }
}
