//! Configuration loading and management for the pension engine.
//!
//! This module loads the income-tax tariff, the social-security contribution
//! table and the replacement-rate model assumptions from a configuration
//! directory into an immutable [`EngineConfig`].
//!
//! # Example
//!
//! ```no_run
//! use pension_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/mx2026").unwrap();
//! println!("Brackets: {}", loader.config().tariff().brackets.len());
//! ```

mod loader;
mod types;

pub use loader::{
    CONTRIBUTION_RATES_FILE, ConfigLoader, LSS1973_FILE, LSS1997_FILE, TARIFF_FILE,
};
pub use types::{
    BaseKind, ContributionComponent, ContributionParams, ContributionRateConfig, EngineConfig,
    InsuranceConfig, Lss1973Assumptions, Lss1997Assumptions, TaxBracket, TaxTariff,
};
