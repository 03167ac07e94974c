//! Statutory deductions.
//!
//! Health insurance and pension are flat percentages of gross pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::AuditStep;

/// Health insurance deduction rate (4%).
pub const HEALTH_DEDUCTION_RATE: Decimal = Decimal::from_parts(4, 0, 0, false, 2);

/// Pension deduction rate (4%).
pub const PENSION_DEDUCTION_RATE: Decimal = Decimal::from_parts(4, 0, 0, false, 2);

/// Deduction rates applied to gross pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRates {
    /// Health insurance rate.
    pub health: Decimal,
    /// Pension rate.
    pub pension: Decimal,
}

impl Default for DeductionRates {
    fn default() -> Self {
        Self {
            health: HEALTH_DEDUCTION_RATE,
            pension: PENSION_DEDUCTION_RATE,
        }
    }
}

/// Deductions taken from one gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Health insurance deduction.
    pub health: Decimal,
    /// Pension deduction.
    pub pension: Decimal,
    /// Gross pay less both deductions.
    pub net_pay: Decimal,
}

/// Applies deduction rates to gross pay.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{apply_deductions, DeductionRates};
/// use rust_decimal::Decimal;
///
/// let deductions = apply_deductions(Decimal::new(59_250, 0), &DeductionRates::default());
/// assert_eq!(deductions.health, Decimal::new(2_370, 0));
/// assert_eq!(deductions.pension, Decimal::new(2_370, 0));
/// assert_eq!(deductions.net_pay, Decimal::new(54_510, 0));
/// ```
pub fn apply_deductions(gross_pay: Decimal, rates: &DeductionRates) -> Deductions {
    let health = gross_pay * rates.health;
    let pension = gross_pay * rates.pension;
    Deductions {
        health,
        pension,
        net_pay: gross_pay - health - pension,
    }
}

/// Builds the audit step recording the deductions.
pub fn deductions_audit_step(
    gross_pay: Decimal,
    rates: &DeductionRates,
    deductions: &Deductions,
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Statutory Deductions".to_string(),
        date: None,
        input: json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "health_rate": rates.health.normalize().to_string(),
            "pension_rate": rates.pension.normalize().to_string()
        }),
        output: json!({
            "health_deduction": deductions.health.normalize().to_string(),
            "pension_deduction": deductions.pension.normalize().to_string(),
            "net_pay": deductions.net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "Gross {} less health {} and pension {} = net {}",
            gross_pay.normalize(),
            deductions.health.normalize(),
            deductions.pension.normalize(),
            deductions.net_pay.normalize()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_worked_example_net_pay() {
        let deductions = apply_deductions(dec("59250"), &DeductionRates::default());

        assert_eq!(deductions.health, dec("2370"));
        assert_eq!(deductions.pension, dec("2370"));
        assert_eq!(deductions.net_pay, dec("54510"));
        assert_eq!(deductions.net_pay, dec("59250") * dec("0.92"));
    }

    #[test]
    fn test_zero_gross_zero_deductions() {
        let deductions = apply_deductions(Decimal::ZERO, &DeductionRates::default());
        assert_eq!(deductions.health, Decimal::ZERO);
        assert_eq!(deductions.net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_deductions_are_additive() {
        let rates = DeductionRates::default();
        let a = apply_deductions(dec("1234.56"), &rates);
        let b = apply_deductions(dec("789.01"), &rates);
        let both = apply_deductions(dec("1234.56") + dec("789.01"), &rates);

        assert_eq!(a.health + b.health, both.health);
        assert_eq!(a.net_pay + b.net_pay, both.net_pay);
    }

    #[test]
    fn test_custom_rates() {
        let rates = DeductionRates {
            health: dec("0.035"),
            pension: dec("0.045"),
        };
        let deductions = apply_deductions(dec("1000"), &rates);
        assert_eq!(deductions.health, dec("35"));
        assert_eq!(deductions.pension, dec("45"));
        assert_eq!(deductions.net_pay, dec("920"));
    }

    #[test]
    fn test_deductions_audit_step() {
        let rates = DeductionRates::default();
        let deductions = apply_deductions(dec("59250"), &rates);
        let step = deductions_audit_step(dec("59250"), &rates, &deductions, 7);

        assert_eq!(step.step_number, 7);
        assert_eq!(step.rule_id, "deductions");
        assert_eq!(step.output["net_pay"].as_str().unwrap(), "54510");
        assert_eq!(step.input["health_rate"].as_str().unwrap(), "0.04");
    }
}
