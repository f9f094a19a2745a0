//! Payroll tax, social-security and pension engine for Mexico
//!
//! This crate computes monthly ISR withholding from a bracketed tariff,
//! IMSS and INFONAVIT contributions on a capped contribution base, and
//! replacement-rate estimates under the 1997 and 1973 Social Security Laws,
//! including a solver for the voluntary savings rate that reaches a target
//! replacement rate.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
