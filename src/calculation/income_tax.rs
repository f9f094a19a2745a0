//! Income-tax (ISR) withholding calculation.
//!
//! This module finds the applicable bracket of a progressive tariff and
//! computes the monthly ISR as the bracket's fixed quota plus its marginal
//! rate on the income above the bracket's lower limit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::TaxBracket;
use crate::error::{EngineError, EngineResult};

/// How the bracket used for a calculation was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BracketSelection {
    /// The income fell inside the bracket at `index`.
    Matched {
        /// Position of the bracket in table order.
        index: usize,
    },
    /// No bracket contained the income, so the last bracket was used.
    FallbackToLast,
}

/// The result of an income-tax evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// The tax owed for the month.
    pub tax: Decimal,
    /// Lower limit of the bracket used.
    pub lower: Decimal,
    /// Upper limit of the bracket used, `None` when unbounded.
    pub upper: Option<Decimal>,
    /// Fixed quota of the bracket used.
    pub fixed_quota: Decimal,
    /// Marginal rate of the bracket used.
    pub rate: Decimal,
    /// Income above the bracket's lower limit (never negative).
    pub excess: Decimal,
    /// Which selection policy produced the bracket.
    pub selection: BracketSelection,
}

/// Computes the monthly income tax for a gross income.
///
/// Brackets are scanned in table order and the first one with
/// `lower <= income <= upper` is used. When the table leaves a gap and no
/// bracket matches, the last bracket in the table is used instead and the
/// result reports [`BracketSelection::FallbackToLast`].
///
/// # Errors
///
/// - `InvalidInput` when `gross_monthly_income` is negative
/// - `ConfigurationError` when `brackets` is empty
///
/// # Examples
///
/// ```
/// use pension_engine::calculation::evaluate_income_tax;
/// use pension_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let brackets = vec![TaxBracket {
///     lower: Decimal::ZERO,
///     upper: Some(Decimal::from_str("644.58").unwrap()),
///     fixed_quota: Decimal::ZERO,
///     rate: Decimal::from_str("0.0192").unwrap(),
/// }];
///
/// let result = evaluate_income_tax(Decimal::from(500), &brackets).unwrap();
/// assert_eq!(result.tax, Decimal::from_str("9.60").unwrap());
/// ```
pub fn evaluate_income_tax(
    gross_monthly_income: Decimal,
    brackets: &[TaxBracket],
) -> EngineResult<TaxResult> {
    if gross_monthly_income < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "gross_monthly_income",
            format!("cannot be negative (got {})", gross_monthly_income),
        ));
    }

    let Some(last) = brackets.last() else {
        return Err(EngineError::configuration(
            "brackets",
            "the income-tax tariff is empty",
        ));
    };

    let (bracket, selection) = match brackets
        .iter()
        .position(|b| b.contains(gross_monthly_income))
    {
        Some(index) => (&brackets[index], BracketSelection::Matched { index }),
        None => {
            warn!(
                income = %gross_monthly_income,
                "No tariff bracket matched income, falling back to last bracket"
            );
            (last, BracketSelection::FallbackToLast)
        }
    };

    let excess = gross_monthly_income
        .checked_sub(bracket.lower)
        .map(|excess| excess.max(Decimal::ZERO));
    let (excess, tax) = excess
        .and_then(|excess| {
            let marginal = excess.checked_mul(bracket.rate)?;
            Some((excess, bracket.fixed_quota.checked_add(marginal)?))
        })
        .ok_or_else(|| {
            EngineError::invalid_input(
                "gross_monthly_income",
                format!("{} is too large to compute tax", gross_monthly_income),
            )
        })?;

    Ok(TaxResult {
        tax,
        lower: bracket.lower,
        upper: bracket.upper,
        fixed_quota: bracket.fixed_quota,
        rate: bracket.rate,
        excess,
        selection,
    })
}
