//! HTTP request handlers for the pension engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    best_retirement_age, calculate_payroll, compute_contributions, effective_rate_curve,
    replacement_rate_1997, replacement_rate_curve, solve_voluntary_rate_for_target,
    sweep_by_retirement_age,
};
use crate::error::EngineResult;

use super::request::{
    EffectiveRateCurveRequest, PayrollRequest, ReplacementRateCurveRequest,
    RetirementSweepRequest, SolveRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CalculationEnvelope, EffectiveRateCurveResponse,
    ReplacementRateCurveResponse, RetirementSweepResponse, SolveResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .route(
            "/payroll/effective-rate-curve",
            post(effective_rate_curve_handler),
        )
        .route("/lss1997/solve", post(solve_handler))
        .route("/lss1997/curve", post(replacement_rate_curve_handler))
        .route("/lss1973/sweep", post(retirement_sweep_handler))
        .with_state(state)
}

/// Handler for POST /payroll.
///
/// Returns ISR, contributions and effective rates for one monthly salary.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    run_calculation(correlation_id, "payroll", || {
        calculate_payroll(
            state.config().config(),
            request.salary_monthly,
            request.sbc_daily,
            request.days_in_month,
        )
    })
}

/// Handler for POST /payroll/effective-rate-curve.
///
/// Contributions are computed once for the given SBC and held fixed while
/// ISR is recomputed at each income on the curve.
async fn effective_rate_curve_handler(
    State(state): State<AppState>,
    payload: Result<Json<EffectiveRateCurveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing effective rate curve request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    run_calculation(correlation_id, "effective_rate_curve", || {
        let config = state.config().config();
        let contributions = compute_contributions(
            request.sbc_daily,
            request.days_in_month,
            config.contribution_rates(),
        )?;
        let points = effective_rate_curve(
            &config.tariff().brackets,
            contributions.totals.grand_total,
            request.income_min,
            request.income_max,
            request.points,
        )?;
        Ok(EffectiveRateCurveResponse { points })
    })
}

/// Handler for POST /lss1997/solve.
async fn solve_handler(
    State(state): State<AppState>,
    payload: Result<Json<SolveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing voluntary rate solve request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    run_calculation(correlation_id, "lss1997_solve", || {
        let assumptions = state.config().config().lss1997();
        let solution = solve_voluntary_rate_for_target(
            assumptions,
            request.age_now,
            request.salary_monthly,
            request.target_rr,
            request.solver_config(),
        )?;
        if !solution.converged {
            warn!(
                correlation_id = %correlation_id,
                target_rr = %request.target_rr,
                iterations = solution.iterations,
                "Solver returned an unconverged estimate"
            );
        }
        let pension = replacement_rate_1997(
            request.age_now,
            request.salary_monthly,
            solution.voluntary_rate,
            assumptions,
        )?;
        Ok(SolveResponse { solution, pension })
    })
}

/// Handler for POST /lss1997/curve.
async fn replacement_rate_curve_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReplacementRateCurveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing replacement rate curve request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    run_calculation(correlation_id, "lss1997_curve", || {
        let points = replacement_rate_curve(
            state.config().config().lss1997(),
            request.age_now,
            request.salary_monthly,
            request.voluntary_min,
            request.voluntary_max,
            request.points,
        )?;
        Ok(ReplacementRateCurveResponse { points })
    })
}

/// Handler for POST /lss1973/sweep.
async fn retirement_sweep_handler(
    State(state): State<AppState>,
    payload: Result<Json<RetirementSweepRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing retirement age sweep request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    run_calculation(correlation_id, "lss1973_sweep", || {
        let rows = sweep_by_retirement_age(
            state.config().config().lss1973(),
            request.age_now,
            request.salary_monthly,
            request.min_age,
            request.max_age,
        )?;
        let best = best_retirement_age(&rows).copied();
        Ok(RetirementSweepResponse { rows, best })
    })
}

/// Unwraps a JSON body or turns the rejection into a 400 response.
fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            warn!(correlation_id = %correlation_id, "Missing JSON content type");
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response())
}

/// Times a calculation and wraps its result in a [`CalculationEnvelope`].
fn run_calculation<T, F>(correlation_id: Uuid, operation: &'static str, calculate: F) -> Response
where
    T: Serialize,
    F: FnOnce() -> EngineResult<T>,
{
    let start_time = Instant::now();
    match calculate() {
        Ok(result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us,
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, CalculationEnvelope::new(result, duration_us))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
