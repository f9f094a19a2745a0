//! Effective tax and contribution rates.
//!
//! An effective rate is an amount divided by a reference base (usually the
//! monthly contribution wage). A non-positive base reports zero rates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxBracket;
use crate::error::{EngineError, EngineResult};

use super::income_tax::evaluate_income_tax;
use super::sampling::evenly_spaced;

/// Effective ISR and contribution rates over a reference base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveRates {
    /// Income tax divided by the reference base.
    pub tax_effective_rate: Decimal,
    /// Total contributions divided by the reference base.
    pub contribution_effective_rate: Decimal,
}

/// One point of an effective-rate curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveRatePoint {
    /// The monthly income the point was evaluated at.
    pub monthly_income: Decimal,
    /// ISR at that income divided by the income.
    pub tax_effective_rate: Decimal,
    /// The contribution total divided by the income.
    pub contribution_effective_rate: Decimal,
}

/// Divides tax and contributions by a reference base.
///
/// When `reference_base` is zero or negative both rates are zero.
///
/// # Examples
///
/// ```
/// use pension_engine::calculation::effective_rates;
/// use rust_decimal::Decimal;
///
/// let rates = effective_rates(Decimal::from(1000), Decimal::from(100), Decimal::from(50));
/// assert_eq!(rates.tax_effective_rate, Decimal::new(1, 1));
/// assert_eq!(rates.contribution_effective_rate, Decimal::new(5, 2));
///
/// let rates = effective_rates(Decimal::ZERO, Decimal::from(100), Decimal::from(50));
/// assert_eq!(rates.tax_effective_rate, Decimal::ZERO);
/// ```
pub fn effective_rates(
    reference_base: Decimal,
    tax_amount: Decimal,
    contribution_total: Decimal,
) -> EffectiveRates {
    if reference_base <= Decimal::ZERO {
        return EffectiveRates::default();
    }
    EffectiveRates {
        tax_effective_rate: tax_amount / reference_base,
        contribution_effective_rate: contribution_total / reference_base,
    }
}

/// Evaluates effective rates across evenly spaced monthly incomes.
///
/// ISR is recomputed at each income; `contribution_total` is held fixed,
/// so the contribution rate shows how a given contribution weighs at
/// different income levels.
///
/// # Errors
///
/// - `InvalidInput` when `income_min` is negative, `income_max <= income_min`
///   or fewer than two points are requested
/// - Any error from [`evaluate_income_tax`]
pub fn effective_rate_curve(
    brackets: &[TaxBracket],
    contribution_total: Decimal,
    income_min: Decimal,
    income_max: Decimal,
    points: u32,
) -> EngineResult<Vec<EffectiveRatePoint>> {
    if income_min < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "income_min",
            format!("cannot be negative (got {})", income_min),
        ));
    }

    evenly_spaced(income_min, income_max, points, "income_min", "income_max")?
        .into_iter()
        .map(|income| {
            let tax = evaluate_income_tax(income, brackets)?;
            let rates = effective_rates(income, tax.tax, contribution_total);
            Ok(EffectiveRatePoint {
                monthly_income: income,
                tax_effective_rate: rates.tax_effective_rate,
                contribution_effective_rate: rates.contribution_effective_rate,
            })
        })
        .collect()
}
