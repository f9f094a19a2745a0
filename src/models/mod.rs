//! Core data models for the pension engine.
//!
//! This module contains the audit records attached to calculation results.

mod audit;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
