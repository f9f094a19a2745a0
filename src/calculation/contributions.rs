//! Social-security (IMSS) and INFONAVIT contribution calculation.
//!
//! This module caps the daily contribution base (SBC) between the configured
//! multiples of the reference unit (UMA), then computes the employer,
//! employee and government contribution of every configured component for
//! a month.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{BaseKind, ContributionParams, ContributionRateConfig};
use crate::error::{EngineError, EngineResult};

/// Shortest month accepted by [`compute_contributions`].
pub const MIN_DAYS_IN_MONTH: u32 = 28;
/// Longest month accepted by [`compute_contributions`].
pub const MAX_DAYS_IN_MONTH: u32 = 31;

/// Reference units above which the excess-over-threshold base starts.
pub const EXCESS_THRESHOLD_UMAS: u32 = 3;

/// The monthly contribution of one configured component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRow {
    /// The insurance line the component belongs to.
    pub insurance: String,
    /// The component name.
    pub component: String,
    /// The base the rates were applied to.
    pub base: BaseKind,
    /// The daily base amount.
    pub daily_base: Decimal,
    /// The employer's monthly contribution.
    pub employer_amount: Decimal,
    /// The employee's monthly contribution.
    pub employee_amount: Decimal,
    /// The government's monthly contribution.
    pub gov_amount: Decimal,
    /// Sum of the three contributions.
    pub total_amount: Decimal,
}

/// Column-wise sums over all contribution rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionTotals {
    /// Total paid by the employer.
    pub employer_total: Decimal,
    /// Total paid by the employee.
    pub employee_total: Decimal,
    /// Total paid by the government.
    pub gov_total: Decimal,
    /// Total of all payers.
    pub grand_total: Decimal,
}

impl ContributionTotals {
    fn add(&mut self, row: &ContributionRow) {
        self.employer_total += row.employer_amount;
        self.employee_total += row.employee_amount;
        self.gov_total += row.gov_amount;
        self.grand_total += row.total_amount;
    }
}

/// The full monthly contribution breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    /// The daily base after capping between the UMA multiples.
    pub capped_daily_base: Decimal,
    /// The reference unit value used.
    pub reference_unit_value: Decimal,
    /// The number of days contributed for.
    pub days_in_month: u32,
    /// One row per configured component, in configuration order.
    pub rows: Vec<ContributionRow>,
    /// Column sums of `rows`.
    pub totals: ContributionTotals,
}

/// Caps a daily wage between the configured floor and ceiling.
///
/// # Examples
///
/// ```
/// use pension_engine::calculation::cap_contribution_base;
/// use pension_engine::config::ContributionParams;
/// use rust_decimal::Decimal;
///
/// let params = ContributionParams {
///     reference_unit_value: Decimal::from(100),
///     min_base_multiple: Decimal::ONE,
///     max_base_multiple: Decimal::from(25),
/// };
/// assert_eq!(cap_contribution_base(Decimal::from(50), &params), Decimal::from(100));
/// assert_eq!(cap_contribution_base(Decimal::from(900), &params), Decimal::from(900));
/// assert_eq!(cap_contribution_base(Decimal::from(9000), &params), Decimal::from(2500));
/// ```
pub fn cap_contribution_base(daily_wage_base: Decimal, params: &ContributionParams) -> Decimal {
    let floor = params.min_base_multiple * params.reference_unit_value;
    let ceiling = params.max_base_multiple * params.reference_unit_value;
    daily_wage_base.min(ceiling).max(floor)
}

/// Returns the daily base a component of the given kind is computed on.
fn daily_base_for(kind: &BaseKind, capped_base: Decimal, reference_unit: Decimal) -> Decimal {
    match kind {
        BaseKind::CappedWage => capped_base,
        BaseKind::ReferenceUnit => reference_unit,
        BaseKind::ExcessOverThreshold => {
            (capped_base - Decimal::from(EXCESS_THRESHOLD_UMAS) * reference_unit)
                .max(Decimal::ZERO)
        }
        BaseKind::Custom(_) => capped_base,
    }
}

/// Computes the monthly contributions for a daily wage base.
///
/// Each role's amount is `rate * daily_base * days_in_month`.
///
/// # Errors
///
/// - `InvalidInput` when `daily_wage_base` is negative or `days_in_month`
///   is outside 28-31
/// - `ConfigurationError` when the reference unit value is not positive
pub fn compute_contributions(
    daily_wage_base: Decimal,
    days_in_month: u32,
    rates: &ContributionRateConfig,
) -> EngineResult<ContributionBreakdown> {
    if daily_wage_base < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "daily_wage_base",
            format!("cannot be negative (got {})", daily_wage_base),
        ));
    }
    if !(MIN_DAYS_IN_MONTH..=MAX_DAYS_IN_MONTH).contains(&days_in_month) {
        return Err(EngineError::invalid_input(
            "days_in_month",
            format!(
                "must be between {} and {} (got {})",
                MIN_DAYS_IN_MONTH, MAX_DAYS_IN_MONTH, days_in_month
            ),
        ));
    }

    let reference_unit = rates.params.reference_unit_value;
    if reference_unit <= Decimal::ZERO {
        return Err(EngineError::configuration(
            "params.reference_unit_value",
            format!("must be greater than zero (got {})", reference_unit),
        ));
    }

    let capped = cap_contribution_base(daily_wage_base, &rates.params);
    if capped != daily_wage_base {
        debug!(
            daily_wage_base = %daily_wage_base,
            capped_daily_base = %capped,
            "Contribution base capped"
        );
    }

    let days = Decimal::from(days_in_month);
    let mut rows = Vec::new();
    let mut totals = ContributionTotals::default();

    for insurance in &rates.insurances {
        for component in &insurance.components {
            let daily_base = daily_base_for(&component.base, capped, reference_unit);
            let employer_amount = component.employer_rate * daily_base * days;
            let employee_amount = component.employee_rate * daily_base * days;
            let gov_amount = component.gov_rate * daily_base * days;

            let row = ContributionRow {
                insurance: insurance.name.clone(),
                component: component.component.clone(),
                base: component.base.clone(),
                daily_base,
                employer_amount,
                employee_amount,
                gov_amount,
                total_amount: employer_amount + employee_amount + gov_amount,
            };
            totals.add(&row);
            rows.push(row);
        }
    }

    Ok(ContributionBreakdown {
        capped_daily_base: capped,
        reference_unit_value: reference_unit,
        days_in_month,
        rows,
        totals,
    })
}
