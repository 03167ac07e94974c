//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod clock_event;
mod diagnostic;
mod employee;
mod pay_line;
mod pay_period;
mod time_buckets;
mod work_session;

pub use clock_event::{ClockEvent, ClockKind, events_for_employee};
pub use diagnostic::{AuditStep, AuditTrace, Diagnostic, DiagnosticKind, Severity};
pub use employee::{Employee, WageBasis};
pub use pay_line::{DailyPay, PayLine, RosterSummary};
pub use pay_period::{HolidayCalendar, NoHolidays, PayPeriod, PublicHoliday};
pub use time_buckets::{Bucket, BucketHours, TimeBuckets, minutes_to_hours};
pub use work_session::{DaySegment, WorkSession};
