//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax, contribution
//! and pension configuration from YAML or JSON files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ContributionRateConfig, EngineConfig, Lss1973Assumptions, Lss1997Assumptions,
    ParamsDocument, TaxTariff,
};

/// File name of the income-tax tariff.
pub const TARIFF_FILE: &str = "isr_tariff.yaml";
/// File name of the social-security contribution table.
pub const CONTRIBUTION_RATES_FILE: &str = "ss_rates.yaml";
/// File name of the 1997-regime assumptions.
pub const LSS1997_FILE: &str = "lss1997_assumptions.yaml";
/// File name of the 1973-regime assumptions.
pub const LSS1973_FILE: &str = "lss1973_assumptions.yaml";

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/mx2026/
/// ├── isr_tariff.yaml            # Monthly ISR tariff brackets
/// ├── ss_rates.yaml              # IMSS + INFONAVIT rates and UMA parameters
/// ├── lss1997_assumptions.yaml   # 1997-regime model parameters
/// └── lss1973_assumptions.yaml   # 1973-regime model parameters
/// ```
///
/// Each document may also be loaded on its own. Files ending in `.json` are
/// parsed as JSON, everything else as YAML.
///
/// # Example
///
/// ```no_run
/// use pension_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/mx2026").unwrap();
/// println!("Loaded tariff: {}", loader.config().tariff().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or a non-numeric field (`ConfigParseError`)
    /// - The tariff has no brackets (`ConfigurationError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tariff = Self::load_tariff(path.join(TARIFF_FILE))?;
        let contribution_rates = Self::load_contribution_rates(path.join(CONTRIBUTION_RATES_FILE))?;
        let lss1997 = Self::load_lss1997_assumptions(path.join(LSS1997_FILE))?;
        let lss1973 = Self::load_lss1973_assumptions(path.join(LSS1973_FILE))?;

        Ok(Self {
            config: EngineConfig::new(tariff, contribution_rates, lss1997, lss1973),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads an income-tax tariff document.
    ///
    /// A tariff without brackets is rejected with `ConfigurationError`.
    pub fn load_tariff<P: AsRef<Path>>(path: P) -> EngineResult<TaxTariff> {
        let tariff: TaxTariff = Self::load_document(path.as_ref())?;
        if tariff.brackets.is_empty() {
            return Err(EngineError::configuration(
                "brackets",
                format!("tariff '{}' has no brackets", path.as_ref().display()),
            ));
        }
        Ok(tariff)
    }

    /// Loads a contribution rate table document.
    pub fn load_contribution_rates<P: AsRef<Path>>(
        path: P,
    ) -> EngineResult<ContributionRateConfig> {
        Self::load_document(path.as_ref())
    }

    /// Loads the `params` of a 1997-regime assumptions document.
    pub fn load_lss1997_assumptions<P: AsRef<Path>>(path: P) -> EngineResult<Lss1997Assumptions> {
        let doc: ParamsDocument<Lss1997Assumptions> = Self::load_document(path.as_ref())?;
        Ok(doc.params)
    }

    /// Loads the `params` of a 1973-regime assumptions document.
    pub fn load_lss1973_assumptions<P: AsRef<Path>>(path: P) -> EngineResult<Lss1973Assumptions> {
        let doc: ParamsDocument<Lss1973Assumptions> = Self::load_document(path.as_ref())?;
        Ok(doc.params)
    }

    /// Reads and parses a YAML or JSON file.
    fn load_document<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let parsed = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| EngineError::ConfigParseError {
            path: path_str,
            message,
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/mx2026"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pension_engine_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().tariff().brackets.len(), 11);
        assert_eq!(
            loader.config().contribution_rates().params.reference_unit_value,
            dec("113.14")
        );
    }

    #[test]
    fn test_tariff_first_bracket() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let first = &loader.config().tariff().brackets[0];

        assert_eq!(first.lower, Decimal::ZERO);
        assert_eq!(first.upper, Some(dec("644.58")));
        assert_eq!(first.fixed_quota, Decimal::ZERO);
        assert_eq!(first.rate, dec("0.0192"));
    }

    #[test]
    fn test_tariff_last_bracket_is_unbounded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let last = loader.config().tariff().brackets.last().unwrap();

        assert_eq!(last.upper, None);
        assert_eq!(last.rate, dec("0.35"));
    }

    #[test]
    fn test_assumptions_loaded_from_params() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.config().lss1997().base_rate, dec("0.35"));
        assert_eq!(loader.config().lss1997().voluntary_multiplier, dec("1.5"));
        assert_eq!(loader.config().lss1973().base_rate_at_65, dec("0.75"));
        assert_eq!(loader.config().lss1973().penalty_per_year, dec("0.06"));
    }

    #[test]
    fn test_load_missing_directory_returns_not_found() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains(TARIFF_FILE));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_rate_returns_parse_error() {
        let path = scratch_file(
            "bad_tariff.yaml",
            "brackets:\n  - lower: 0\n    upper: null\n    fixed_quota: 0\n    rate: abc\n",
        );

        match ConfigLoader::load_tariff(&path) {
            Err(EngineError::ConfigParseError { path: p, .. }) => {
                assert!(p.contains("bad_tariff.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_tariff_returns_configuration_error() {
        let path = scratch_file("empty_tariff.yaml", "name: empty\nbrackets: []\n");

        match ConfigLoader::load_tariff(&path) {
            Err(EngineError::ConfigurationError { key, .. }) => assert_eq!(key, "brackets"),
            other => panic!("Expected ConfigurationError, got {:?}", other),
        }
    }

    #[test]
    fn test_json_tariff_is_parsed_by_extension() {
        let path = scratch_file(
            "tariff.json",
            r#"{"brackets": [{"lower": 0, "upper": null, "fixed_quota": 0, "rate": 0.1}]}"#,
        );

        let tariff = ConfigLoader::load_tariff(&path).unwrap();
        assert_eq!(tariff.brackets.len(), 1);
        assert_eq!(tariff.brackets[0].rate, dec("0.1"));
        assert_eq!(tariff.brackets[0].upper, None);
    }

    #[test]
    fn test_contribution_components_keep_configuration_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rates = loader.config().contribution_rates();

        assert_eq!(rates.insurances[0].name, "Enfermedades y maternidad");
        assert_eq!(rates.insurances[0].components[0].component, "Cuota fija");
        assert_eq!(rates.insurances.last().unwrap().name, "INFONAVIT");
    }
}
