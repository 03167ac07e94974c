//! Employee model and wage basis.
//!
//! This module defines the Employee struct and the WageBasis variant that
//! decides how worked minutes turn into money.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How an employee is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WageBasis {
    /// Paid per hour worked.
    ///
    /// `rate_per_hour` is `None` when the employee record explicitly has no
    /// rate configured; the wage calculator then falls back to the policy's
    /// default rate and reports a diagnostic.
    Hourly {
        /// The hourly rate, if configured.
        #[serde(default)]
        rate_per_hour: Option<Decimal>,
    },
    /// Paid a fixed monthly salary for the employee's role.
    Fixed {
        /// The monthly salary, already resolved from the role salary table.
        monthly_salary: Decimal,
    },
}

/// An employee whose attendance is being paid.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::{Employee, WageBasis};
/// use rust_decimal::Decimal;
///
/// let employee = Employee::hourly("emp_001", Decimal::new(5000, 0));
/// assert!(!employee.is_fixed_salary());
/// assert_eq!(
///     employee.wage_basis,
///     WageBasis::Hourly { rate_per_hour: Some(Decimal::new(5000, 0)) }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// How the employee is paid.
    pub wage_basis: WageBasis,
}

impl Employee {
    /// Creates an hourly employee with a configured rate.
    pub fn hourly(id: impl Into<String>, rate_per_hour: Decimal) -> Self {
        Self {
            id: id.into(),
            wage_basis: WageBasis::Hourly {
                rate_per_hour: Some(rate_per_hour),
            },
        }
    }

    /// Creates a fixed-salary employee.
    pub fn fixed(id: impl Into<String>, monthly_salary: Decimal) -> Self {
        Self {
            id: id.into(),
            wage_basis: WageBasis::Fixed { monthly_salary },
        }
    }

    /// Returns true if the employee is paid a fixed monthly salary.
    pub fn is_fixed_salary(&self) -> bool {
        matches!(self.wage_basis, WageBasis::Fixed { .. })
    }

    /// Rejects a configured rate or salary that is zero or negative.
    ///
    /// An hourly employee with no rate passes; the default rate applies.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidWageRate` naming the rejected amount.
    pub fn validate_wage(&self) -> EngineResult<()> {
        let amount = match self.wage_basis {
            WageBasis::Hourly {
                rate_per_hour: Some(rate),
            } => rate,
            WageBasis::Hourly {
                rate_per_hour: None,
            } => return Ok(()),
            WageBasis::Fixed { monthly_salary } => monthly_salary,
        };
        if amount <= Decimal::ZERO {
            return Err(EngineError::InvalidWageRate {
                employee_id: self.id.clone(),
                amount,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_hourly_employee() {
        let json = r#"{
            "id": "emp_001",
            "wage_basis": { "type": "hourly", "rate_per_hour": "5000" }
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(
            employee.wage_basis,
            WageBasis::Hourly {
                rate_per_hour: Some(Decimal::new(5000, 0))
            }
        );
    }

    #[test]
    fn test_deserialize_hourly_employee_without_rate() {
        let json = r#"{
            "id": "emp_002",
            "wage_basis": { "type": "hourly" }
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(
            employee.wage_basis,
            WageBasis::Hourly {
                rate_per_hour: None
            }
        );
    }

    #[test]
    fn test_deserialize_fixed_employee() {
        let json = r#"{
            "id": "emp_003",
            "wage_basis": { "type": "fixed", "monthly_salary": "3000000" }
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.is_fixed_salary());
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let employee = Employee::fixed("emp_004", Decimal::new(2_400_000, 0));
        let json = serde_json::to_string(&employee).unwrap();
        assert!(json.contains("\"type\":\"fixed\""));

        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_negative_hourly_rate_rejected() {
        let employee = Employee::hourly("emp_006", Decimal::new(-5000, 0));
        assert!(matches!(
            employee.validate_wage(),
            Err(EngineError::InvalidWageRate { .. })
        ));
    }

    #[test]
    fn test_zero_salary_rejected() {
        let employee = Employee::fixed("emp_007", Decimal::ZERO);
        assert!(employee.validate_wage().is_err());
    }

    #[test]
    fn test_unset_and_positive_rates_accepted() {
        let unset = Employee {
            id: "emp_008".to_string(),
            wage_basis: WageBasis::Hourly {
                rate_per_hour: None,
            },
        };
        assert!(unset.validate_wage().is_ok());
        assert!(Employee::hourly("emp_009", Decimal::new(10_030, 0)).validate_wage().is_ok());
    }

    #[test]
    fn test_hourly_employee_is_not_fixed_salary() {
        let employee = Employee::hourly("emp_005", Decimal::new(9860, 0));
        assert!(!employee.is_fixed_salary());
    }
}
