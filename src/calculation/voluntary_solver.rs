//! Voluntary contribution rate solver.
//!
//! Inverts a [`Lss1997Model`] by bisection to find the voluntary rate that
//! reaches a target replacement rate. The solver never fails for lack of
//! convergence: it returns its best estimate together with the number of
//! iterations used and a `converged` flag, and leaves the caller to decide
//! whether the estimate is good enough.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

use super::lss1997::Lss1997Model;

/// Most bisection steps a [`SolverConfig`] may request.
pub const MAX_SOLVER_ITERATIONS: u32 = 200;

/// Highest voluntary rate the solver may search up to (100% of salary).
pub const MAX_VOLUNTARY_RATE: Decimal = Decimal::ONE;

/// Search parameters for [`solve_voluntary_rate_for_target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Lowest voluntary rate considered.
    pub lower_bound: Decimal,
    /// Highest voluntary rate considered.
    pub upper_bound: Decimal,
    /// Accepted distance between achieved and target replacement rate.
    pub tolerance: Decimal,
    /// Maximum number of bisection steps.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    /// Searches `[0, 0.30]` to within `0.0001`, for at most 60 steps.
    fn default() -> Self {
        Self {
            lower_bound: Decimal::ZERO,
            upper_bound: Decimal::new(30, 2),
            tolerance: Decimal::new(1, 4),
            max_iterations: 60,
        }
    }
}

/// The voluntary rate found by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoluntaryRateSolution {
    /// The voluntary contribution rate, within the search bounds.
    pub voluntary_rate: Decimal,
    /// The replacement rate the model gives at `voluntary_rate`.
    pub achieved_replacement_rate: Decimal,
    /// Bisection steps performed.
    pub iterations: u32,
    /// Whether the achieved rate is within tolerance of the target.
    pub converged: bool,
}

/// Finds the voluntary rate whose replacement rate is within tolerance of
/// `target_rr`.
///
/// A target of zero or less is met without saving anything and returns a
/// zero rate after zero iterations. Otherwise each step evaluates the model
/// at the midpoint of the current bracket, returns when the achieved rate is
/// within `tolerance`, and keeps the half that contains the target. When
/// `max_iterations` runs out the midpoint of the final bracket is returned
/// with `converged = false`.
///
/// The model must be monotone non-decreasing in the voluntary rate over the
/// search bounds; see [`Lss1997Model`].
///
/// # Errors
///
/// `InvalidInput` when `upper_bound <= lower_bound`, when the bounds leave
/// `[0, MAX_VOLUNTARY_RATE]`, when `tolerance` is not positive, when
/// `max_iterations` exceeds [`MAX_SOLVER_ITERATIONS`], or when the model
/// overflows at a candidate rate.
///
/// # Examples
///
/// ```
/// use pension_engine::calculation::{SolverConfig, solve_voluntary_rate_for_target};
/// use pension_engine::config::Lss1997Assumptions;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let target = Decimal::from_str("0.50").unwrap();
/// let solution = solve_voluntary_rate_for_target(
///     &Lss1997Assumptions::default(),
///     30,
///     Decimal::from(20000),
///     target,
///     SolverConfig::default(),
/// )
/// .unwrap();
///
/// assert!(solution.converged);
/// let tolerance = Decimal::from_str("0.0001").unwrap();
/// assert!((solution.achieved_replacement_rate - target).abs() <= tolerance);
/// ```
pub fn solve_voluntary_rate_for_target<M: Lss1997Model + ?Sized>(
    model: &M,
    age_now: u32,
    salary_monthly: Decimal,
    target_rr: Decimal,
    config: SolverConfig,
) -> EngineResult<VoluntaryRateSolution> {
    if target_rr <= Decimal::ZERO {
        return Ok(VoluntaryRateSolution {
            voluntary_rate: Decimal::ZERO,
            achieved_replacement_rate: Decimal::ZERO,
            iterations: 0,
            converged: true,
        });
    }

    validate_config(&config)?;

    let achieved_at = |voluntary_rate: Decimal| -> EngineResult<Decimal> {
        Ok(model
            .evaluate(age_now, salary_monthly, voluntary_rate)?
            .replacement_rate)
    };

    let mut lo = config.lower_bound;
    let mut hi = config.upper_bound;

    for i in 0..config.max_iterations {
        let mid = (lo + hi) / Decimal::TWO;
        let achieved = achieved_at(mid)?;

        if (achieved - target_rr).abs() <= config.tolerance {
            debug!(
                target_rr = %target_rr,
                voluntary_rate = %mid,
                iterations = i + 1,
                "Voluntary rate solver converged"
            );
            return Ok(VoluntaryRateSolution {
                voluntary_rate: mid,
                achieved_replacement_rate: achieved,
                iterations: i + 1,
                converged: true,
            });
        }

        if achieved < target_rr {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let voluntary_rate = (lo + hi) / Decimal::TWO;
    let achieved = achieved_at(voluntary_rate)?;
    warn!(
        target_rr = %target_rr,
        voluntary_rate = %voluntary_rate,
        achieved_rr = %achieved,
        max_iterations = config.max_iterations,
        "Voluntary rate solver did not converge, returning best estimate"
    );

    Ok(VoluntaryRateSolution {
        voluntary_rate,
        achieved_replacement_rate: achieved,
        iterations: config.max_iterations,
        converged: false,
    })
}

fn validate_config(config: &SolverConfig) -> EngineResult<()> {
    if config.upper_bound <= config.lower_bound {
        return Err(EngineError::invalid_input(
            "upper_bound",
            format!(
                "must be greater than lower_bound ({} <= {})",
                config.upper_bound, config.lower_bound
            ),
        ));
    }
    if config.lower_bound < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "lower_bound",
            format!("must not be negative (got {})", config.lower_bound),
        ));
    }
    if config.upper_bound > MAX_VOLUNTARY_RATE {
        return Err(EngineError::invalid_input(
            "upper_bound",
            format!(
                "must not exceed {} (got {})",
                MAX_VOLUNTARY_RATE, config.upper_bound
            ),
        ));
    }
    if config.tolerance <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "tolerance",
            format!("must be greater than zero (got {})", config.tolerance),
        ));
    }
    if config.max_iterations > MAX_SOLVER_ITERATIONS {
        return Err(EngineError::invalid_input(
            "max_iterations",
            format!(
                "must not exceed {} (got {})",
                MAX_SOLVER_ITERATIONS, config.max_iterations
            ),
        ));
    }
    Ok(())
}
