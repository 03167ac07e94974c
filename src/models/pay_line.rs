//! Pay result models.
//!
//! This module contains the per-day [`DailyPay`], the per-employee
//! [`PayLine`] and the roster-wide [`RosterSummary`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BucketHours, PayPeriod, TimeBuckets};

/// Classified minutes and gross pay for one employee on one local day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPay {
    /// The local calendar date.
    pub date: NaiveDate,
    /// Whether the date is a holiday.
    pub is_holiday: bool,
    /// Minutes per bucket.
    pub buckets: TimeBuckets,
    /// Gross pay for the day, rounded to the currency scale.
    pub gross_pay: Decimal,
}

/// Payroll result for one employee over one period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayLine, PayPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::single_day(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap());
/// let line = PayLine::empty("emp_001", period, Decimal::new(5000, 0));
/// assert_eq!(line.gross_pay, Decimal::ZERO);
/// assert_eq!(line.days_worked, 0);
/// assert!(!line.is_provisional);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLine {
    /// The employee this line is for.
    pub employee_id: String,
    /// The period covered.
    pub period: PayPeriod,
    /// Minutes per bucket.
    pub buckets: TimeBuckets,
    /// Hours per bucket, derived from `buckets`.
    pub hours: BucketHours,
    /// The effective hourly rate used.
    pub hourly_rate: Decimal,
    /// Gross pay before deductions.
    pub gross_pay: Decimal,
    /// Health insurance deduction.
    pub health_deduction: Decimal,
    /// Pension deduction.
    pub pension_deduction: Decimal,
    /// Gross pay less deductions.
    pub net_pay: Decimal,
    /// Number of days with at least one worked minute.
    pub days_worked: u32,
    /// True when the period includes "now" and a session is still open.
    pub is_provisional: bool,
}

impl PayLine {
    /// A zero-valued line for a period with no work.
    pub fn empty(employee_id: impl Into<String>, period: PayPeriod, hourly_rate: Decimal) -> Self {
        Self {
            employee_id: employee_id.into(),
            period,
            buckets: TimeBuckets::default(),
            hours: BucketHours::default(),
            hourly_rate,
            gross_pay: Decimal::ZERO,
            health_deduction: Decimal::ZERO,
            pension_deduction: Decimal::ZERO,
            net_pay: Decimal::ZERO,
            days_worked: 0,
            is_provisional: false,
        }
    }

    /// Adds two pay lines element-wise.
    ///
    /// The resulting period spans both inputs and the line is provisional if
    /// either input was. The hourly rate is taken from `self`.
    pub fn merge(&self, other: &PayLine) -> PayLine {
        let buckets = self.buckets + other.buckets;
        PayLine {
            employee_id: self.employee_id.clone(),
            period: self.period.span(&other.period),
            buckets,
            hours: buckets.to_hours(),
            hourly_rate: self.hourly_rate,
            gross_pay: self.gross_pay + other.gross_pay,
            health_deduction: self.health_deduction + other.health_deduction,
            pension_deduction: self.pension_deduction + other.pension_deduction,
            net_pay: self.net_pay + other.net_pay,
            days_worked: self.days_worked + other.days_worked,
            is_provisional: self.is_provisional || other.is_provisional,
        }
    }
}

/// Totals across every employee's pay line for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSummary {
    /// The period covered.
    pub period: PayPeriod,
    /// Number of employees included.
    pub employee_count: u32,
    /// Number of included pay lines that are provisional.
    pub provisional_count: u32,
    /// Minutes per bucket across the roster.
    pub buckets: TimeBuckets,
    /// Hours per bucket across the roster.
    pub hours: BucketHours,
    /// Total gross pay.
    pub gross_pay: Decimal,
    /// Total health deductions.
    pub health_deduction: Decimal,
    /// Total pension deductions.
    pub pension_deduction: Decimal,
    /// Total net pay.
    pub net_pay: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn line(day: u32, regular: i64, gross: &str, provisional: bool) -> PayLine {
        let buckets = TimeBuckets {
            regular_minutes: regular,
            ..TimeBuckets::default()
        };
        let gross = dec(gross);
        let health = gross * dec("0.04");
        let pension = gross * dec("0.04");
        PayLine {
            employee_id: "emp_001".to_string(),
            period: PayPeriod::single_day(date(day)),
            buckets,
            hours: buckets.to_hours(),
            hourly_rate: dec("5000"),
            gross_pay: gross,
            health_deduction: health,
            pension_deduction: pension,
            net_pay: gross - health - pension,
            days_worked: 1,
            is_provisional: provisional,
        }
    }

    #[test]
    fn test_merge_sums_every_field() {
        let merged = line(5, 480, "40000", false).merge(&line(6, 240, "20000", false));

        assert_eq!(merged.period.start_date, date(5));
        assert_eq!(merged.period.end_date, date(6));
        assert_eq!(merged.buckets.regular_minutes, 720);
        assert_eq!(merged.hours.regular_hours, dec("12"));
        assert_eq!(merged.gross_pay, dec("60000"));
        assert_eq!(merged.health_deduction, dec("2400"));
        assert_eq!(merged.net_pay, dec("55200"));
        assert_eq!(merged.days_worked, 2);
        assert!(!merged.is_provisional);
    }

    #[test]
    fn test_merge_is_provisional_if_either_side_is() {
        let merged = line(5, 60, "5000", false).merge(&line(6, 60, "5000", true));
        assert!(merged.is_provisional);
    }

    #[test]
    fn test_empty_pay_line_serialization() {
        let empty = PayLine::empty("emp_001", PayPeriod::single_day(date(1)), dec("5000"));
        let json = serde_json::to_string(&empty).unwrap();
        assert!(json.contains("\"gross_pay\":\"0\""));
        assert!(json.contains("\"is_provisional\":false"));

        let deserialized: PayLine = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, empty);
    }
}
