//! HTTP API module for the pension engine.
//!
//! This module provides the REST API endpoints for payroll, contribution and
//! pension calculations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EffectiveRateCurveRequest, PayrollRequest, ReplacementRateCurveRequest,
    RetirementSweepRequest, SolveRequest,
};
pub use response::{
    ApiError, CalculationEnvelope, EffectiveRateCurveResponse, ReplacementRateCurveResponse,
    RetirementSweepResponse, SolveResponse,
};
pub use state::AppState;
