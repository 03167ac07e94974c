//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only static configuration problems and invalid caller input are errors;
//! data-quality issues in the event stream are reported as
//! [`Diagnostic`](crate::models::Diagnostic) values instead.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot run with.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A fixed-salary role has no entry in the role salary table.
    #[error("Role not found in salary table: {role}")]
    RoleNotFound {
        /// The role code that was not found.
        role: String,
    },

    /// A pay period ends before it starts.
    #[error("Invalid pay period: end date {end} is before start date {start}")]
    InvalidPeriod {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// An employee's hourly rate or monthly salary is zero or negative.
    #[error("Invalid wage for employee {employee_id}: {amount} must be positive")]
    InvalidWageRate {
        /// The employee whose wage was rejected.
        employee_id: String,
        /// The rejected rate or salary.
        amount: Decimal,
    },

    /// Pay amounts exceeded the range of the decimal type.
    #[error("Pay for employee {employee_id} overflowed at hourly rate {hourly_rate}")]
    PayOverflow {
        /// The employee being paid.
        employee_id: String,
        /// The effective hourly rate in use.
        hourly_rate: Decimal,
    },

    /// Roster totals exceeded the range of the decimal type.
    #[error("Roster totals overflowed across {employee_count} employees")]
    RosterOverflow {
        /// Number of pay lines being totalled.
        employee_count: usize,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
