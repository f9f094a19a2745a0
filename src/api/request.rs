//! Request types for the pension engine API.
//!
//! This module defines the JSON request structures for every endpoint.
//! Optional fields fall back to the engine defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    DEFAULT_DAYS_IN_MONTH, DEFAULT_MAX_RETIREMENT_AGE, DEFAULT_MIN_RETIREMENT_AGE, SolverConfig,
};

fn default_days_in_month() -> u32 {
    DEFAULT_DAYS_IN_MONTH
}

fn default_income_curve_points() -> u32 {
    40
}

fn default_replacement_curve_points() -> u32 {
    20
}

fn default_min_age() -> u32 {
    DEFAULT_MIN_RETIREMENT_AGE
}

fn default_max_age() -> u32 {
    DEFAULT_MAX_RETIREMENT_AGE
}

/// Request body for the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Gross monthly salary subject to ISR.
    pub salary_monthly: Decimal,
    /// Daily contribution base (SBC) before capping.
    pub sbc_daily: Decimal,
    /// Days contributed for in the month (28-31).
    #[serde(default = "default_days_in_month")]
    pub days_in_month: u32,
}

/// Request body for the `/payroll/effective-rate-curve` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveRateCurveRequest {
    /// Daily contribution base the fixed contribution total is computed on.
    pub sbc_daily: Decimal,
    /// Days contributed for in the month (28-31).
    #[serde(default = "default_days_in_month")]
    pub days_in_month: u32,
    /// Lowest monthly income on the curve.
    pub income_min: Decimal,
    /// Highest monthly income on the curve.
    pub income_max: Decimal,
    /// Number of points, both ends included.
    #[serde(default = "default_income_curve_points")]
    pub points: u32,
}

/// Request body for the `/lss1997/solve` endpoint.
///
/// Solver fields left out use [`SolverConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    /// The worker's current age.
    pub age_now: u32,
    /// Monthly salary the replacement rate applies to.
    pub salary_monthly: Decimal,
    /// The replacement rate to reach.
    pub target_rr: Decimal,
    /// Lowest voluntary rate considered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<Decimal>,
    /// Highest voluntary rate considered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Decimal>,
    /// Accepted distance from the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<Decimal>,
    /// Maximum number of bisection steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
}

impl SolveRequest {
    /// Builds the solver configuration, filling gaps from the defaults.
    pub fn solver_config(&self) -> SolverConfig {
        let defaults = SolverConfig::default();
        SolverConfig {
            lower_bound: self.lower_bound.unwrap_or(defaults.lower_bound),
            upper_bound: self.upper_bound.unwrap_or(defaults.upper_bound),
            tolerance: self.tolerance.unwrap_or(defaults.tolerance),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
        }
    }
}

/// Request body for the `/lss1997/curve` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementRateCurveRequest {
    /// The worker's current age.
    pub age_now: u32,
    /// Monthly salary the replacement rate applies to.
    pub salary_monthly: Decimal,
    /// Lowest voluntary rate on the curve.
    pub voluntary_min: Decimal,
    /// Highest voluntary rate on the curve.
    pub voluntary_max: Decimal,
    /// Number of points, both ends included.
    #[serde(default = "default_replacement_curve_points")]
    pub points: u32,
}

/// Request body for the `/lss1973/sweep` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementSweepRequest {
    /// The worker's current age.
    pub age_now: u32,
    /// Monthly salary the replacement rate applies to.
    pub salary_monthly: Decimal,
    /// Youngest retirement age in the sweep.
    #[serde(default = "default_min_age")]
    pub min_age: u32,
    /// Oldest retirement age in the sweep.
    #[serde(default = "default_max_age")]
    pub max_age: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_payroll_request_defaults_days_in_month() {
        let json = r#"{ "salary_monthly": "20000", "sbc_daily": "700" }"#;
        let request: PayrollRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.days_in_month, 30);
        assert_eq!(request.salary_monthly, Decimal::from(20000));
    }

    #[test]
    fn test_payroll_request_accepts_numeric_amounts() {
        let json = r#"{ "salary_monthly": 20000.50, "sbc_daily": 700, "days_in_month": 31 }"#;
        let request: PayrollRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.salary_monthly, Decimal::from_str("20000.50").unwrap());
        assert_eq!(request.days_in_month, 31);
    }

    #[test]
    fn test_payroll_request_requires_salary() {
        let json = r#"{ "sbc_daily": "700" }"#;
        let result: Result<PayrollRequest, _> = serde_json::from_str(json);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("missing field `salary_monthly`"));
    }

    #[test]
    fn test_effective_rate_curve_request_defaults() {
        let json = r#"{ "sbc_daily": "700", "income_min": "1000", "income_max": "50000" }"#;
        let request: EffectiveRateCurveRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.days_in_month, 30);
        assert_eq!(request.points, 40);
    }

    #[test]
    fn test_solve_request_uses_solver_defaults() {
        let json = r#"{ "age_now": 30, "salary_monthly": "20000", "target_rr": "0.5" }"#;
        let request: SolveRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.solver_config(), SolverConfig::default());
    }

    #[test]
    fn test_solve_request_overrides_given_fields_only() {
        let json = r#"{
            "age_now": 30,
            "salary_monthly": "20000",
            "target_rr": "0.5",
            "upper_bound": "0.2",
            "max_iterations": 10
        }"#;
        let request: SolveRequest = serde_json::from_str(json).unwrap();
        let config = request.solver_config();

        assert_eq!(config.lower_bound, Decimal::ZERO);
        assert_eq!(config.upper_bound, Decimal::from_str("0.2").unwrap());
        assert_eq!(config.tolerance, Decimal::from_str("0.0001").unwrap());
        assert_eq!(config.max_iterations, 10);
    }

    #[test]
    fn test_solve_request_skips_absent_options_when_serialized() {
        let request = SolveRequest {
            age_now: 30,
            salary_monthly: Decimal::from(20000),
            target_rr: Decimal::from_str("0.5").unwrap(),
            lower_bound: None,
            upper_bound: None,
            tolerance: None,
            max_iterations: None,
        };
        let json = serde_json::to_string(&request).unwrap();

        assert!(!json.contains("upper_bound"));
        assert!(!json.contains("max_iterations"));
    }

    #[test]
    fn test_replacement_rate_curve_request_defaults_points() {
        let json = r#"{
            "age_now": 30,
            "salary_monthly": "20000",
            "voluntary_min": "0",
            "voluntary_max": "0.3"
        }"#;
        let request: ReplacementRateCurveRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.points, 20);
    }

    #[test]
    fn test_retirement_sweep_request_defaults_ages() {
        let json = r#"{ "age_now": 55, "salary_monthly": "20000" }"#;
        let request: RetirementSweepRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.min_age, 60);
        assert_eq!(request.max_age, 65);
    }
}
