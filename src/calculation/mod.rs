//! Calculation logic for the payroll engine.
//!
//! Each stage is a pure function over immutable input, leaves first:
//! session reconstruction, day partitioning, bucket allocation, wage
//! calculation, deductions and period aggregation. [`PayrollEngine`] wires
//! them together and [`estimate_live_pay`] covers employees who are still
//! clocked in.

mod bucket_allocation;
mod day_partition;
mod deductions;
mod live_estimate;
mod local_time;
mod payroll;
mod period_aggregation;
mod session_reconstruction;
mod wage;

pub use bucket_allocation::{
    NIGHT_WINDOW_END_HOUR, NIGHT_WINDOW_START_HOUR, REGULAR_MINUTES_PER_DAY, allocate_by_day,
    allocate_day, allocation_audit_step,
};
pub use day_partition::{DayPartition, partition_session};
pub use deductions::{
    DeductionRates, Deductions, HEALTH_DEDUCTION_RATE, PENSION_DEDUCTION_RATE, apply_deductions,
    deductions_audit_step,
};
pub use live_estimate::{estimate_live_pay, is_provisional};
pub use payroll::{PayrollEngine, PayrollOutcome, RosterOutcome};
pub use period_aggregation::{aggregate_pay_line, summarize_roster};
pub use session_reconstruction::{SessionReconstruction, reconstruct_sessions};
pub use wage::{
    DEFAULT_HOURLY_RATE, HOLIDAY_MULTIPLIER, HourlyRateResolution, MONEY_DECIMAL_PLACES,
    Multipliers, NIGHT_MULTIPLIER, OVERTIME_MULTIPLIER, REGULAR_MULTIPLIER, RateSource,
    SALARY_DAYS_PER_MONTH, SALARY_HOURS_PER_DAY, calculate_daily_pay, calculate_gross_pay,
    gross_pay_audit_step, resolve_hourly_rate, round_money,
};
