//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::FixedOffset;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calculation::{DEFAULT_HOURLY_RATE, DeductionRates, Multipliers};
use crate::error::{EngineError, EngineResult};
use crate::models::PublicHoliday;

/// Largest UTC offset accepted, in minutes (chrono rejects a full day).
const MAX_UTC_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Metadata about the restaurant the engine computes payroll for.
#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantConfig {
    /// The human-readable name of the restaurant.
    pub name: String,
    /// The restaurant's fixed offset from UTC, in minutes east.
    pub utc_offset_minutes: i32,
}

impl RestaurantConfig {
    /// The restaurant's time zone as a fixed offset.
    pub fn time_zone(&self) -> EngineResult<FixedOffset> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(EngineError::InvalidConfig {
                field: "utc_offset_minutes".to_string(),
                message: format!("{} is outside +/-{}", self.utc_offset_minutes, MAX_UTC_OFFSET_MINUTES),
            });
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            EngineError::InvalidConfig {
                field: "utc_offset_minutes".to_string(),
                message: format!("{} is not a valid offset", self.utc_offset_minutes),
            }
        })
    }
}

/// The pay rules applied to every employee.
///
/// Every field falls back to its named constant when omitted from YAML.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy::default();
/// assert_eq!(policy.multipliers.night, Decimal::new(135, 2));
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPolicy {
    /// Multiplier per bucket.
    #[serde(default)]
    pub multipliers: Multipliers,
    /// Statutory deduction rates.
    #[serde(default)]
    pub deductions: DeductionRates,
    /// Rate used for hourly employees with no configured rate.
    #[serde(default = "default_hourly_rate")]
    pub default_hourly_rate: Decimal,
}

fn default_hourly_rate() -> Decimal {
    DEFAULT_HOURLY_RATE
}

impl Default for PayPolicy {
    fn default() -> Self {
        Self {
            multipliers: Multipliers::default(),
            deductions: DeductionRates::default(),
            default_hourly_rate: DEFAULT_HOURLY_RATE,
        }
    }
}

impl PayPolicy {
    /// Rejects values the engine cannot run with.
    ///
    /// Multipliers must be non-negative, deduction rates must lie in
    /// `[0, 1]` and sum to at most 1, and the default rate must be positive.
    pub fn validate(&self) -> EngineResult<()> {
        let multipliers = [
            ("multipliers.regular", self.multipliers.regular),
            ("multipliers.overtime", self.multipliers.overtime),
            ("multipliers.night", self.multipliers.night),
            ("multipliers.holiday", self.multipliers.holiday),
        ];
        for (field, value) in multipliers {
            if value < Decimal::ZERO {
                return Err(invalid(field, format!("multiplier {} is negative", value)));
            }
        }

        let rates = [
            ("deductions.health", self.deductions.health),
            ("deductions.pension", self.deductions.pension),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(invalid(field, format!("rate {} is outside [0, 1]", value)));
            }
        }
        if self.deductions.health + self.deductions.pension > Decimal::ONE {
            return Err(invalid(
                "deductions",
                "combined deduction rates exceed 100%".to_string(),
            ));
        }

        if self.default_hourly_rate <= Decimal::ZERO {
            return Err(invalid(
                "default_hourly_rate",
                format!("rate {} must be positive", self.default_hourly_rate),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: String) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message,
    }
}

/// Roles configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RolesConfig {
    /// Map of role code to monthly salary.
    pub roles: HashMap<String, Decimal>,
}

impl RolesConfig {
    /// Rejects non-positive salaries.
    pub fn validate(&self) -> EngineResult<()> {
        for (role, salary) in &self.roles {
            if *salary <= Decimal::ZERO {
                return Err(invalid(
                    &format!("roles.{}", role),
                    format!("monthly salary {} must be positive", salary),
                ));
            }
        }
        Ok(())
    }
}

/// Holidays configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidaysConfig {
    /// Dated public holidays.
    #[serde(default)]
    pub holidays: Vec<PublicHoliday>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_policy_is_valid() {
        assert!(PayPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        let mut policy = PayPolicy::default();
        policy.multipliers.night = dec("-1.35");

        match policy.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "multipliers.night");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_deduction_rate_above_one_rejected() {
        let mut policy = PayPolicy::default();
        policy.deductions.pension = dec("1.5");

        assert!(matches!(
            policy.validate(),
            Err(EngineError::InvalidConfig { field, .. }) if field == "deductions.pension"
        ));
    }

    #[test]
    fn test_combined_deductions_above_one_rejected() {
        let mut policy = PayPolicy::default();
        policy.deductions.health = dec("0.6");
        policy.deductions.pension = dec("0.6");

        assert!(matches!(
            policy.validate(),
            Err(EngineError::InvalidConfig { field, .. }) if field == "deductions"
        ));
    }

    #[test]
    fn test_zero_default_rate_rejected() {
        let policy = PayPolicy {
            default_hourly_rate: Decimal::ZERO,
            ..PayPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_partial_policy_yaml_uses_defaults() {
        let policy: PayPolicy = serde_yaml::from_str("default_hourly_rate: \"9860\"\n").unwrap();

        assert_eq!(policy.default_hourly_rate, dec("9860"));
        assert_eq!(policy.multipliers, Multipliers::default());
        assert_eq!(policy.deductions, DeductionRates::default());
    }

    #[test]
    fn test_time_zone_from_offset() {
        let restaurant = RestaurantConfig {
            name: "Test".to_string(),
            utc_offset_minutes: 540,
        };
        assert_eq!(restaurant.time_zone().unwrap().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        let restaurant = RestaurantConfig {
            name: "Test".to_string(),
            utc_offset_minutes: 24 * 60,
        };
        assert!(restaurant.time_zone().is_err());
    }

    #[test]
    fn test_non_positive_role_salary_rejected() {
        let mut roles = RolesConfig::default();
        roles.roles.insert("manager".to_string(), Decimal::ZERO);
        assert!(roles.validate().is_err());
    }
}
