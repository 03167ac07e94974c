//! Period aggregation.
//!
//! Sums per-day results into a [`PayLine`] for a date range, and pay lines
//! into a [`RosterSummary`]. Every total is a plain sum, so splitting a period
//! in two and adding the halves gives the same answer.

use rust_decimal::Decimal;

use crate::models::{DailyPay, PayLine, PayPeriod, RosterSummary, TimeBuckets};

use super::deductions::{DeductionRates, apply_deductions};

/// Sums the days that fall within `period` into a pay line.
///
/// Days outside the period are ignored. An empty input produces a
/// zero-valued line.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{aggregate_pay_line, DeductionRates};
/// use payroll_engine::models::{DailyPay, PayPeriod, TimeBuckets};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// let day = DailyPay {
///     date,
///     is_holiday: false,
///     buckets: TimeBuckets { regular_minutes: 480, ..TimeBuckets::default() },
///     gross_pay: Decimal::new(40_000, 0),
/// };
///
/// let line = aggregate_pay_line(
///     "emp_001",
///     PayPeriod::single_day(date),
///     Decimal::new(5000, 0),
///     &[day],
///     &DeductionRates::default(),
///     false,
/// );
/// assert_eq!(line.days_worked, 1);
/// assert_eq!(line.net_pay, Decimal::new(36_800, 0));
/// ```
pub fn aggregate_pay_line(
    employee_id: &str,
    period: PayPeriod,
    hourly_rate: Decimal,
    days: &[DailyPay],
    rates: &DeductionRates,
    is_provisional: bool,
) -> PayLine {
    let in_period: Vec<&DailyPay> = days
        .iter()
        .filter(|d| period.contains_date(d.date))
        .collect();

    let buckets: TimeBuckets = in_period.iter().map(|d| d.buckets).sum();
    let gross_pay: Decimal = in_period.iter().map(|d| d.gross_pay).sum();
    let days_worked = in_period
        .iter()
        .filter(|d| d.buckets.total_minutes() > 0)
        .count() as u32;
    let deductions = apply_deductions(gross_pay, rates);

    PayLine {
        employee_id: employee_id.to_string(),
        period,
        buckets,
        hours: buckets.to_hours(),
        hourly_rate,
        gross_pay,
        health_deduction: deductions.health,
        pension_deduction: deductions.pension,
        net_pay: deductions.net_pay,
        days_worked,
        is_provisional,
    }
}

/// Sums pay lines across employees.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::summarize_roster;
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::single_day(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap());
/// let summary = summarize_roster(period, &[]);
/// assert_eq!(summary.employee_count, 0);
/// assert!(summary.buckets.is_empty());
/// ```
pub fn summarize_roster(period: PayPeriod, lines: &[PayLine]) -> RosterSummary {
    let buckets: TimeBuckets = lines.iter().map(|l| l.buckets).sum();

    RosterSummary {
        period,
        employee_count: lines.len() as u32,
        provisional_count: lines.iter().filter(|l| l.is_provisional).count() as u32,
        buckets,
        hours: buckets.to_hours(),
        gross_pay: lines.iter().map(|l| l.gross_pay).sum(),
        health_deduction: lines.iter().map(|l| l.health_deduction).sum(),
        pension_deduction: lines.iter().map(|l| l.pension_deduction).sum(),
        net_pay: lines.iter().map(|l| l.net_pay).sum(),
    }
}
