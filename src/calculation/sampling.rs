//! Evenly spaced sample points for swept curves.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Most points a swept curve may request.
pub const MAX_CURVE_POINTS: u32 = 500;

/// Returns `points` values from `min` to `max` inclusive, evenly spaced.
///
/// `min_field` and `max_field` name the inputs in error messages.
pub(crate) fn evenly_spaced(
    min: Decimal,
    max: Decimal,
    points: u32,
    min_field: &str,
    max_field: &str,
) -> EngineResult<Vec<Decimal>> {
    if max <= min {
        return Err(EngineError::invalid_input(
            max_field,
            format!("must be greater than {} ({} <= {})", min_field, max, min),
        ));
    }
    if !(2..=MAX_CURVE_POINTS).contains(&points) {
        return Err(EngineError::invalid_input(
            "points",
            format!(
                "must be between 2 and {} (got {})",
                MAX_CURVE_POINTS, points
            ),
        ));
    }

    let span = max.checked_sub(min).ok_or_else(|| {
        EngineError::invalid_input(
            max_field,
            format!("range {}..{} is too wide", min, max),
        )
    })?;
    let step = span / Decimal::from(points - 1);
    Ok((0..points)
        .map(|i| {
            if i == points - 1 {
                max
            } else {
                min + step * Decimal::from(i)
            }
        })
        .collect())
}
