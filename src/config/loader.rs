//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading restaurant
//! payroll configuration from YAML files.

use chrono::FixedOffset;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::PublicHoliday;

use super::types::{HolidaysConfig, PayPolicy, RestaurantConfig, RolesConfig};

/// Loads, validates and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/restaurant/
/// ├── restaurant.yaml  # Name and UTC offset
/// ├── pay_policy.yaml  # Multipliers, deduction rates, default hourly rate
/// ├── roles.yaml       # Role code -> monthly salary
/// └── holidays.yaml    # Dated public holidays
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/restaurant").unwrap();
/// let salary = loader.monthly_salary_for_role("manager").unwrap();
/// println!("{} pays managers {}", loader.restaurant().name, salary);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    restaurant: RestaurantConfig,
    time_zone: FixedOffset,
    pay_policy: PayPolicy,
    roles: RolesConfig,
    holidays: Vec<PublicHoliday>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any value fails validation (negative multipliers, deduction rates
    ///   outside `[0, 1]`, a non-positive default rate or salary, an
    ///   out-of-range UTC offset)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let restaurant = Self::load_yaml::<RestaurantConfig>(&path.join("restaurant.yaml"))?;
        let pay_policy = Self::load_yaml::<PayPolicy>(&path.join("pay_policy.yaml"))?;
        let roles = Self::load_yaml::<RolesConfig>(&path.join("roles.yaml"))?;
        let holidays = Self::load_yaml::<HolidaysConfig>(&path.join("holidays.yaml"))?.holidays;

        let loader = Self::from_parts(restaurant, pay_policy, roles, holidays)?;

        debug!(
            restaurant = %loader.restaurant.name,
            utc_offset_minutes = loader.restaurant.utc_offset_minutes,
            roles = loader.roles.roles.len(),
            holidays = loader.holidays.len(),
            "Loaded payroll configuration"
        );

        Ok(loader)
    }

    /// Builds a loader from already-parsed parts, validating them.
    ///
    /// Fails on the same values [`ConfigLoader::load`] rejects.
    pub fn from_parts(
        restaurant: RestaurantConfig,
        pay_policy: PayPolicy,
        roles: RolesConfig,
        holidays: Vec<PublicHoliday>,
    ) -> EngineResult<Self> {
        let time_zone = restaurant.time_zone()?;
        pay_policy.validate()?;
        roles.validate()?;
        Ok(Self {
            restaurant,
            time_zone,
            pay_policy,
            roles,
            holidays,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the restaurant metadata.
    pub fn restaurant(&self) -> &RestaurantConfig {
        &self.restaurant
    }

    /// Returns the restaurant's time zone.
    pub fn time_zone(&self) -> FixedOffset {
        self.time_zone
    }

    /// Returns the validated pay policy.
    pub fn pay_policy(&self) -> &PayPolicy {
        &self.pay_policy
    }

    /// Returns the configured public holidays.
    pub fn holidays(&self) -> &[PublicHoliday] {
        &self.holidays
    }

    /// Looks up the monthly salary for a fixed-salary role.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::RoleNotFound` if the role is not in the table.
    pub fn monthly_salary_for_role(&self, role: &str) -> EngineResult<Decimal> {
        self.roles
            .roles
            .get(role)
            .copied()
            .ok_or_else(|| EngineError::RoleNotFound {
                role: role.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/restaurant")
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_config() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_restaurant_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.restaurant().name, "Main Street Kitchen");
        assert_eq!(loader.restaurant().utc_offset_minutes, 540);
        assert_eq!(loader.time_zone().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_pay_policy_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader.pay_policy();

        assert_eq!(policy.multipliers.regular, dec("1.00"));
        assert_eq!(policy.multipliers.overtime, dec("1.25"));
        assert_eq!(policy.multipliers.night, dec("1.35"));
        assert_eq!(policy.multipliers.holiday, dec("1.75"));
        assert_eq!(policy.deductions.health, dec("0.04"));
        assert_eq!(policy.deductions.pension, dec("0.04"));
        assert_eq!(policy.default_hourly_rate, dec("10030"));
    }

    #[test]
    fn test_monthly_salary_for_role() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.monthly_salary_for_role("manager").unwrap(), dec("3000000"));
        assert_eq!(loader.monthly_salary_for_role("head_chef").unwrap(), dec("2880000"));
    }

    #[test]
    fn test_unknown_role_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.monthly_salary_for_role("sommelier") {
            Err(EngineError::RoleNotFound { role }) => assert_eq!(role, "sommelier"),
            other => panic!("Expected RoleNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_holidays_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let new_year = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(loader.holidays().iter().any(|h| h.date == new_year));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("restaurant.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_from_parts_validates_policy() {
        let mut policy = PayPolicy::default();
        policy.multipliers.overtime = dec("-0.5");

        let result = ConfigLoader::from_parts(
            RestaurantConfig {
                name: "Test".to_string(),
                utc_offset_minutes: 0,
            },
            policy,
            RolesConfig::default(),
            Vec::new(),
        );

        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }
}
