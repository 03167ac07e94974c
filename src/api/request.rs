//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/pay-line` and
//! `/roster-summary` endpoints and their conversion into domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{ClockEvent, ClockKind, Employee, PayPeriod, PublicHoliday, WageBasis};

/// Request body for the `/pay-line` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayLineRequest {
    /// The employee to compute pay for.
    pub employee: EmployeeRequest,
    /// The period to compute.
    pub period: PayPeriodRequest,
    /// Clock events; events for other employees are ignored.
    #[serde(default)]
    pub events: Vec<EventRequest>,
    /// The evaluation instant; defaults to the time the request is handled.
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
    /// Holidays added to the configured calendar for this request.
    #[serde(default)]
    pub public_holidays: Vec<PublicHolidayRequest>,
}

/// Request body for the `/roster-summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRequest {
    /// The employees to include.
    pub employees: Vec<EmployeeRequest>,
    /// The period to compute.
    pub period: PayPeriodRequest,
    /// Clock events for any employees.
    #[serde(default)]
    pub events: Vec<EventRequest>,
    /// The evaluation instant; defaults to the time the request is handled.
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

/// Employee information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// How the employee is paid.
    pub wage_basis: WageBasisRequest,
}

/// Wage basis as supplied by callers.
///
/// Fixed-salary employees are identified by role; the salary itself comes
/// from the configured role table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WageBasisRequest {
    /// Paid per hour; an omitted rate falls back to the policy default.
    Hourly {
        /// The hourly rate, if configured.
        #[serde(default)]
        rate_per_hour: Option<Decimal>,
    },
    /// Paid a fixed monthly salary looked up by role.
    Fixed {
        /// The role code in the salary table.
        role: String,
    },
}

/// Pay period in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayPeriodRequest {
    /// The first date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last date of the period (inclusive).
    pub end_date: NaiveDate,
}

/// A clock event in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    /// The employee who clocked.
    pub employee_id: String,
    /// Clock-in or clock-out.
    pub kind: ClockKind,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Tie-breaker for identical timestamps; defaults to array position.
    #[serde(default)]
    pub sequence_hint: Option<u64>,
}

/// Public holiday information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicHolidayRequest {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday.
    pub name: String,
}

impl EmployeeRequest {
    /// Resolves the request into an employee, looking up fixed salaries.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::RoleNotFound` for a fixed-salary role that is
    /// not in the salary table, and `EngineError::InvalidWageRate` for a
    /// rate that is zero or negative.
    pub fn into_employee(self, config: &ConfigLoader) -> EngineResult<Employee> {
        let wage_basis = match self.wage_basis {
            WageBasisRequest::Hourly { rate_per_hour } => WageBasis::Hourly { rate_per_hour },
            WageBasisRequest::Fixed { role } => WageBasis::Fixed {
                monthly_salary: config.monthly_salary_for_role(&role)?,
            },
        };
        let employee = Employee {
            id: self.id,
            wage_basis,
        };
        employee.validate_wage()?;
        Ok(employee)
    }
}

impl PayPeriodRequest {
    /// Validates the date range.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPeriod` when the end precedes the start.
    pub fn into_period(self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.start_date, self.end_date)
    }
}

/// Converts request events, filling missing sequence hints with array order.
pub fn into_clock_events(events: Vec<EventRequest>) -> Vec<ClockEvent> {
    events
        .into_iter()
        .enumerate()
        .map(|(index, event)| ClockEvent {
            employee_id: event.employee_id,
            kind: event.kind,
            timestamp: event.timestamp,
            sequence_hint: event.sequence_hint.unwrap_or(index as u64),
        })
        .collect()
}

impl From<PublicHolidayRequest> for PublicHoliday {
    fn from(req: PublicHolidayRequest) -> Self {
        PublicHoliday {
            date: req.date,
            name: req.name,
        }
    }
}
