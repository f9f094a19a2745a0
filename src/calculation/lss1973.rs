//! 1973 Social Security Law (LSS 1973) pension model.
//!
//! Placeholder early-retirement model: each year of retirement before the
//! full-pension age removes a fixed amount from the replacement rate, and
//! retiring after it earns no bonus.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Lss1973Assumptions;
use crate::error::{EngineError, EngineResult};

use super::lss1997::{clamp_replacement_rate, monthly_pension};

/// Youngest retirement age in a default sweep.
pub const DEFAULT_MIN_RETIREMENT_AGE: u32 = 60;
/// Oldest retirement age in a default sweep.
pub const DEFAULT_MAX_RETIREMENT_AGE: u32 = 65;
/// Widest `max_age - min_age` a sweep accepts.
pub const MAX_RETIREMENT_AGE_SPAN: u32 = 50;

/// The result of a 1973-regime evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lss1973Result {
    /// The retirement age evaluated.
    pub retirement_age: u32,
    /// Projected pension divided by salary, within `[0, 1.2]`.
    pub replacement_rate: Decimal,
    /// The projected monthly pension.
    pub pension_monthly: Decimal,
    /// The worker's current age.
    pub age_now: u32,
    /// The monthly salary the rate applies to.
    pub salary_monthly: Decimal,
}

/// One row of a retirement-age sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementAgeRow {
    /// The retirement age.
    pub retirement_age: u32,
    /// The replacement rate at that age.
    pub replacement_rate: Decimal,
    /// The monthly pension at that age.
    pub pension_monthly: Decimal,
}

impl From<Lss1973Result> for RetirementAgeRow {
    fn from(result: Lss1973Result) -> Self {
        RetirementAgeRow {
            retirement_age: result.retirement_age,
            replacement_rate: result.replacement_rate,
            pension_monthly: result.pension_monthly,
        }
    }
}

/// A replacement-rate model for the 1973 regime.
///
/// Implementors provide the unclamped rate; [`Lss1973Model::evaluate`]
/// applies the `[0, 1.2]` output bounds and the pension product.
pub trait Lss1973Model {
    /// Returns the replacement rate before clamping.
    fn unclamped_rate(
        &self,
        age_now: u32,
        retirement_age: u32,
        salary_monthly: Decimal,
    ) -> Decimal;

    /// Evaluates the model for a worker retiring at `retirement_age`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the pension overflows a `Decimal`.
    fn evaluate(
        &self,
        age_now: u32,
        retirement_age: u32,
        salary_monthly: Decimal,
    ) -> EngineResult<Lss1973Result> {
        let replacement_rate =
            clamp_replacement_rate(self.unclamped_rate(age_now, retirement_age, salary_monthly));
        Ok(Lss1973Result {
            retirement_age,
            replacement_rate,
            pension_monthly: monthly_pension(replacement_rate, salary_monthly)?,
            age_now,
            salary_monthly,
        })
    }
}

/// `base_rate_at_65 - penalty_per_year * max(0, full_pension_age - retirement_age)`.
impl Lss1973Model for Lss1973Assumptions {
    fn unclamped_rate(
        &self,
        _age_now: u32,
        retirement_age: u32,
        _salary_monthly: Decimal,
    ) -> Decimal {
        let years_early = self.full_pension_age.saturating_sub(retirement_age);
        self.base_rate_at_65
            .saturating_sub(self.penalty_per_year.saturating_mul(Decimal::from(years_early)))
    }
}

/// Estimates the 1973-regime replacement rate and monthly pension.
///
/// # Errors
///
/// `InvalidInput` when the pension overflows a `Decimal`.
///
/// # Examples
///
/// ```
/// use pension_engine::calculation::pension_1973;
/// use pension_engine::config::Lss1973Assumptions;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result =
///     pension_1973(55, 60, Decimal::from(20000), &Lss1973Assumptions::default()).unwrap();
/// assert_eq!(result.replacement_rate, Decimal::from_str("0.45").unwrap());
/// assert_eq!(result.pension_monthly, Decimal::from_str("9000.00").unwrap());
/// ```
pub fn pension_1973(
    age_now: u32,
    retirement_age: u32,
    salary_monthly: Decimal,
    assumptions: &Lss1973Assumptions,
) -> EngineResult<Lss1973Result> {
    assumptions.evaluate(age_now, retirement_age, salary_monthly)
}

/// Evaluates the model once per integer retirement age in
/// `[min_age, max_age]`, in ascending order.
///
/// # Errors
///
/// `InvalidInput` when `max_age <= min_age`, when the range spans more than
/// [`MAX_RETIREMENT_AGE_SPAN`] years, or when a pension overflows.
pub fn sweep_by_retirement_age<M: Lss1973Model + ?Sized>(
    model: &M,
    age_now: u32,
    salary_monthly: Decimal,
    min_age: u32,
    max_age: u32,
) -> EngineResult<Vec<RetirementAgeRow>> {
    if max_age <= min_age {
        return Err(EngineError::invalid_input(
            "max_age",
            format!("must be greater than min_age ({} <= {})", max_age, min_age),
        ));
    }
    if max_age - min_age > MAX_RETIREMENT_AGE_SPAN {
        return Err(EngineError::invalid_input(
            "max_age",
            format!(
                "range {}..={} spans more than {} years",
                min_age, max_age, MAX_RETIREMENT_AGE_SPAN
            ),
        ));
    }

    (min_age..=max_age)
        .map(|retirement_age| {
            model
                .evaluate(age_now, retirement_age, salary_monthly)
                .map(RetirementAgeRow::from)
        })
        .collect()
}

/// Returns the row with the highest replacement rate, the earliest age on ties.
pub fn best_retirement_age(rows: &[RetirementAgeRow]) -> Option<&RetirementAgeRow> {
    rows.iter().fold(None, |best: Option<&RetirementAgeRow>, row| match best {
        Some(current) if current.replacement_rate >= row.replacement_rate => Some(current),
        _ => Some(row),
    })
}
