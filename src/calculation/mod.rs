//! Calculation logic for the pension engine.
//!
//! This module contains the ISR withholding evaluator, the IMSS and INFONAVIT
//! contribution aggregator, effective-rate calculations, the 1997-regime
//! replacement-rate model with its voluntary-rate solver, and the 1973-regime
//! pension model with its retirement-age sweep.

mod contributions;
mod effective_rate;
mod income_tax;
mod lss1973;
mod lss1997;
mod payroll;
mod sampling;
mod voluntary_solver;

pub use contributions::{
    ContributionBreakdown, ContributionRow, ContributionTotals, EXCESS_THRESHOLD_UMAS,
    MAX_DAYS_IN_MONTH, MIN_DAYS_IN_MONTH, cap_contribution_base, compute_contributions,
};
pub use effective_rate::{
    EffectiveRatePoint, EffectiveRates, effective_rate_curve, effective_rates,
};
pub use income_tax::{BracketSelection, TaxResult, evaluate_income_tax};
pub use lss1973::{
    DEFAULT_MAX_RETIREMENT_AGE, DEFAULT_MIN_RETIREMENT_AGE, Lss1973Model, Lss1973Result,
    MAX_RETIREMENT_AGE_SPAN, RetirementAgeRow, best_retirement_age, pension_1973,
    sweep_by_retirement_age,
};
pub use lss1997::{
    Lss1997Model, Lss1997Result, REPLACEMENT_RATE_CEILING, REPLACEMENT_RATE_FLOOR,
    ReplacementRatePoint, clamp_replacement_rate, replacement_rate_1997, replacement_rate_curve,
};
pub use payroll::{DEFAULT_DAYS_IN_MONTH, PayrollSummary, calculate_payroll};
pub use sampling::MAX_CURVE_POINTS;
pub use voluntary_solver::{
    MAX_SOLVER_ITERATIONS, MAX_VOLUNTARY_RATE, SolverConfig, VoluntaryRateSolution,
    solve_voluntary_rate_for_target,
};
