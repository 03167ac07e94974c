//! Wage calculation.
//!
//! This module resolves an employee's effective hourly rate from their wage
//! basis and converts bucketed minutes into gross pay using the multiplier
//! table.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::models::{AuditStep, Bucket, DailyPay, Diagnostic, DiagnosticKind, Employee, TimeBuckets, WageBasis};

/// Multiplier for regular minutes (100%).
pub const REGULAR_MULTIPLIER: Decimal = Decimal::from_parts(100, 0, 0, false, 2);

/// Multiplier for overtime minutes (125%).
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

/// Multiplier for night-window minutes (135%).
pub const NIGHT_MULTIPLIER: Decimal = Decimal::from_parts(135, 0, 0, false, 2);

/// Multiplier for holiday minutes (175%).
pub const HOLIDAY_MULTIPLIER: Decimal = Decimal::from_parts(175, 0, 0, false, 2);

/// Days a fixed monthly salary is spread over.
pub const SALARY_DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Hours in the working day a fixed daily rate is spread over.
pub const SALARY_HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Hourly rate used when an hourly employee has no configured rate.
pub const DEFAULT_HOURLY_RATE: Decimal = Decimal::from_parts(10_030, 0, 0, false, 0);

/// Decimal places money is rounded to at the end of each day.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Pay multipliers per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multipliers {
    /// Regular-time multiplier.
    pub regular: Decimal,
    /// Overtime multiplier.
    pub overtime: Decimal,
    /// Night-window multiplier.
    pub night: Decimal,
    /// Holiday multiplier.
    pub holiday: Decimal,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            regular: REGULAR_MULTIPLIER,
            overtime: OVERTIME_MULTIPLIER,
            night: NIGHT_MULTIPLIER,
            holiday: HOLIDAY_MULTIPLIER,
        }
    }
}

impl Multipliers {
    /// The multiplier for one bucket.
    pub fn for_bucket(&self, bucket: Bucket) -> Decimal {
        match bucket {
            Bucket::Regular => self.regular,
            Bucket::Overtime => self.overtime,
            Bucket::Night => self.night,
            Bucket::Holiday => self.holiday,
        }
    }
}

/// Where an effective hourly rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// The employee's own hourly rate.
    HourlyRate,
    /// Derived from a fixed monthly salary.
    FixedSalary,
    /// The policy default, because no rate was configured.
    DefaultRate,
}

/// The result of resolving an employee's effective hourly rate.
#[derive(Debug, Clone)]
pub struct HourlyRateResolution {
    /// The effective hourly rate.
    pub rate: Decimal,
    /// Where the rate came from.
    pub source: RateSource,
    /// Set when the default rate had to be used.
    pub diagnostic: Option<Diagnostic>,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Resolves the effective hourly rate for an employee.
///
/// - `Hourly` with a rate uses that rate.
/// - `Hourly` without a rate uses `default_rate` and reports
///   [`DiagnosticKind::MissingWageConfig`].
/// - `Fixed` derives `monthly_salary / 30 / 8`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{resolve_hourly_rate, RateSource, DEFAULT_HOURLY_RATE};
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::fixed("emp_001", Decimal::new(3_000_000, 0));
/// let resolution = resolve_hourly_rate(&employee, DEFAULT_HOURLY_RATE, 1);
/// assert_eq!(resolution.rate, Decimal::new(12_500, 0));
/// assert_eq!(resolution.source, RateSource::FixedSalary);
/// assert!(resolution.diagnostic.is_none());
/// ```
pub fn resolve_hourly_rate(
    employee: &Employee,
    default_rate: Decimal,
    step_number: u32,
) -> HourlyRateResolution {
    let (rate, source, input, reasoning) = match &employee.wage_basis {
        WageBasis::Hourly {
            rate_per_hour: Some(rate),
        } => (
            *rate,
            RateSource::HourlyRate,
            json!({ "wage_basis": "hourly", "rate_per_hour": rate.to_string() }),
            format!("Hourly employee paid {} per hour", rate),
        ),
        WageBasis::Hourly {
            rate_per_hour: None,
        } => (
            default_rate,
            RateSource::DefaultRate,
            json!({ "wage_basis": "hourly", "rate_per_hour": null }),
            format!(
                "No hourly rate configured; using default rate {}",
                default_rate
            ),
        ),
        WageBasis::Fixed { monthly_salary } => {
            let daily_rate = *monthly_salary / SALARY_DAYS_PER_MONTH;
            let hourly_rate = daily_rate / SALARY_HOURS_PER_DAY;
            (
                hourly_rate,
                RateSource::FixedSalary,
                json!({ "wage_basis": "fixed", "monthly_salary": monthly_salary.to_string() }),
                format!(
                    "Monthly salary {} / {} days = {} per day; / {} hours = {} per hour",
                    monthly_salary,
                    SALARY_DAYS_PER_MONTH,
                    daily_rate.normalize(),
                    SALARY_HOURS_PER_DAY,
                    hourly_rate.normalize()
                ),
            )
        }
    };

    let diagnostic = (source == RateSource::DefaultRate).then(|| {
        debug!(employee_id = %employee.id, default_rate = %default_rate, "Falling back to default hourly rate");
        Diagnostic::new(
            DiagnosticKind::MissingWageConfig,
            &employee.id,
            format!(
                "Employee {} has no hourly rate; default rate {} applied",
                employee.id, default_rate
            ),
        )
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "wage_rate_resolution".to_string(),
        rule_name: "Hourly Rate Resolution".to_string(),
        date: None,
        input,
        output: json!({
            "rate": rate.normalize().to_string(),
            "source": source
        }),
        reasoning,
    };

    HourlyRateResolution {
        rate,
        source,
        diagnostic,
        audit_step,
    }
}

/// Computes unrounded gross pay for a set of bucketed minutes.
///
/// `gross = sum over buckets of (minutes / 60) x hourly_rate x multiplier`
///
/// Returns `None` if any step overflows the decimal range.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{calculate_gross_pay, Multipliers};
/// use payroll_engine::models::TimeBuckets;
/// use rust_decimal::Decimal;
///
/// let buckets = TimeBuckets {
///     regular_minutes: 480,
///     overtime_minutes: 120,
///     night_minutes: 60,
///     holiday_minutes: 0,
/// };
/// let gross = calculate_gross_pay(&buckets, Decimal::new(5000, 0), &Multipliers::default());
/// assert_eq!(gross, Some(Decimal::new(59_250, 0)));
/// ```
pub fn calculate_gross_pay(
    buckets: &TimeBuckets,
    hourly_rate: Decimal,
    multipliers: &Multipliers,
) -> Option<Decimal> {
    Bucket::ALL.iter().try_fold(Decimal::ZERO, |total, bucket| {
        let amount = Decimal::new(buckets.minutes(*bucket), 0)
            .checked_mul(hourly_rate)?
            .checked_mul(multipliers.for_bucket(*bucket))?
            .checked_div(Decimal::new(60, 0))?;
        total.checked_add(amount)
    })
}

/// Rounds a money amount to [`MONEY_DECIMAL_PLACES`], midpoint away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Prices one employee-day.
///
/// The day's gross pay is rounded once so that summing days never
/// accumulates sub-cent remainders. Returns `None` on overflow.
pub fn calculate_daily_pay(
    date: NaiveDate,
    is_holiday: bool,
    buckets: TimeBuckets,
    hourly_rate: Decimal,
    multipliers: &Multipliers,
) -> Option<DailyPay> {
    let gross = calculate_gross_pay(&buckets, hourly_rate, multipliers)?;
    Some(DailyPay {
        date,
        is_holiday,
        buckets,
        gross_pay: round_money(gross),
    })
}

/// Builds the audit step recording one day's gross pay.
pub fn gross_pay_audit_step(
    day: &DailyPay,
    hourly_rate: Decimal,
    multipliers: &Multipliers,
    step_number: u32,
) -> AuditStep {
    let parts: Vec<String> = Bucket::ALL
        .iter()
        .filter(|bucket| day.buckets.minutes(**bucket) > 0)
        .map(|bucket| {
            format!(
                "{} min {} x {}",
                day.buckets.minutes(*bucket),
                bucket,
                multipliers.for_bucket(*bucket).normalize()
            )
        })
        .collect();

    AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Daily Gross Pay".to_string(),
        date: Some(day.date),
        input: json!({
            "hourly_rate": hourly_rate.normalize().to_string(),
            "regular_minutes": day.buckets.regular_minutes,
            "overtime_minutes": day.buckets.overtime_minutes,
            "night_minutes": day.buckets.night_minutes,
            "holiday_minutes": day.buckets.holiday_minutes
        }),
        output: json!({
            "gross_pay": day.gross_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} at {} per hour = {}",
            parts.join(" + "),
            hourly_rate.normalize(),
            day.gross_pay.normalize()
        ),
    }
}
