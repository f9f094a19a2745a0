//! 1997 Social Security Law (LSS 1997) replacement-rate model.
//!
//! The current formula is a linear placeholder awaiting authoritative
//! annuity tables. It sits behind the [`Lss1997Model`] trait so the solver
//! and the curve sweep do not depend on its body.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Lss1997Assumptions;
use crate::error::{EngineError, EngineResult};

use super::sampling::evenly_spaced;

/// Lowest replacement rate any model may report.
pub const REPLACEMENT_RATE_FLOOR: Decimal = Decimal::ZERO;

/// Highest replacement rate any model may report (120%).
pub const REPLACEMENT_RATE_CEILING: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

/// Clamps a raw replacement rate to `[0, 1.2]`.
pub fn clamp_replacement_rate(rate: Decimal) -> Decimal {
    rate.clamp(REPLACEMENT_RATE_FLOOR, REPLACEMENT_RATE_CEILING)
}

/// `replacement_rate * salary_monthly`, or `InvalidInput` on overflow.
pub(crate) fn monthly_pension(
    replacement_rate: Decimal,
    salary_monthly: Decimal,
) -> EngineResult<Decimal> {
    replacement_rate.checked_mul(salary_monthly).ok_or_else(|| {
        EngineError::invalid_input(
            "salary_monthly",
            format!("{} is too large to compute a pension", salary_monthly),
        )
    })
}

/// The result of a 1997-regime evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lss1997Result {
    /// Projected pension divided by salary, within `[0, 1.2]`.
    pub replacement_rate: Decimal,
    /// The projected monthly pension.
    pub pension_monthly: Decimal,
    /// The worker's current age.
    pub age_now: u32,
    /// The monthly salary the rate applies to.
    pub salary_monthly: Decimal,
    /// The voluntary contribution rate evaluated.
    pub voluntary_rate: Decimal,
}

/// One point of a replacement rate versus voluntary rate curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRatePoint {
    /// The voluntary contribution rate.
    pub voluntary_rate: Decimal,
    /// The replacement rate it achieves.
    pub replacement_rate: Decimal,
}

/// A replacement-rate model for the 1997 regime.
///
/// Implementors provide the unclamped rate; [`Lss1997Model::evaluate`]
/// applies the `[0, 1.2]` output bounds and the pension product.
///
/// The voluntary-rate solver bisects over this model, so `unclamped_rate`
/// must be monotone non-decreasing in `voluntary_rate` over the solver's
/// search bounds. A non-monotone model makes the solver return an
/// incorrect rate without any error.
pub trait Lss1997Model {
    /// Returns the replacement rate before clamping.
    fn unclamped_rate(
        &self,
        age_now: u32,
        salary_monthly: Decimal,
        voluntary_rate: Decimal,
    ) -> Decimal;

    /// Evaluates the model for a worker.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the pension overflows a `Decimal`.
    fn evaluate(
        &self,
        age_now: u32,
        salary_monthly: Decimal,
        voluntary_rate: Decimal,
    ) -> EngineResult<Lss1997Result> {
        let replacement_rate =
            clamp_replacement_rate(self.unclamped_rate(age_now, salary_monthly, voluntary_rate));
        Ok(Lss1997Result {
            replacement_rate,
            pension_monthly: monthly_pension(replacement_rate, salary_monthly)?,
            age_now,
            salary_monthly,
            voluntary_rate,
        })
    }
}

/// Linear placeholder: `base_rate + voluntary_multiplier * voluntary_rate`.
impl Lss1997Model for Lss1997Assumptions {
    fn unclamped_rate(
        &self,
        _age_now: u32,
        _salary_monthly: Decimal,
        voluntary_rate: Decimal,
    ) -> Decimal {
        self.base_rate
            .saturating_add(self.voluntary_multiplier.saturating_mul(voluntary_rate))
    }
}

/// Estimates the 1997-regime replacement rate and monthly pension.
///
/// # Errors
///
/// `InvalidInput` when the pension overflows a `Decimal`.
///
/// # Examples
///
/// ```
/// use pension_engine::calculation::replacement_rate_1997;
/// use pension_engine::config::Lss1997Assumptions;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = replacement_rate_1997(
///     30,
///     Decimal::from(20000),
///     Decimal::from_str("0.10").unwrap(),
///     &Lss1997Assumptions::default(),
/// )
/// .unwrap();
/// assert_eq!(result.replacement_rate, Decimal::from_str("0.50").unwrap());
/// assert_eq!(result.pension_monthly, Decimal::from(10000));
/// ```
pub fn replacement_rate_1997(
    age_now: u32,
    salary_monthly: Decimal,
    voluntary_rate: Decimal,
    assumptions: &Lss1997Assumptions,
) -> EngineResult<Lss1997Result> {
    assumptions.evaluate(age_now, salary_monthly, voluntary_rate)
}

/// Evaluates the model at evenly spaced voluntary rates, both ends included.
///
/// # Errors
///
/// `InvalidInput` when `voluntary_max <= voluntary_min`, when `points` is
/// outside `2..=MAX_CURVE_POINTS`, or when a pension overflows.
pub fn replacement_rate_curve<M: Lss1997Model + ?Sized>(
    model: &M,
    age_now: u32,
    salary_monthly: Decimal,
    voluntary_min: Decimal,
    voluntary_max: Decimal,
    points: u32,
) -> EngineResult<Vec<ReplacementRatePoint>> {
    let rates = evenly_spaced(
        voluntary_min,
        voluntary_max,
        points,
        "voluntary_min",
        "voluntary_max",
    )?;

    rates
        .into_iter()
        .map(|voluntary_rate| -> EngineResult<ReplacementRatePoint> {
            let result = model.evaluate(age_now, salary_monthly, voluntary_rate)?;
            Ok(ReplacementRatePoint {
                voluntary_rate,
                replacement_rate: result.replacement_rate,
            })
        })
        .collect()
}
