//! Configuration types for tax, contribution and pension calculations.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML (or JSON) documents of a configuration
//! directory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single bracket of a progressive income-tax tariff.
///
/// A bracket covers incomes from `lower` up to and including `upper`. An
/// `upper` of `None` means the bracket has no upper limit.
///
/// # Example
///
/// ```
/// use pension_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bracket = TaxBracket {
///     lower: Decimal::ZERO,
///     upper: Some(Decimal::from_str("644.58").unwrap()),
///     fixed_quota: Decimal::ZERO,
///     rate: Decimal::from_str("0.0192").unwrap(),
/// };
/// assert!(bracket.contains(Decimal::from(500)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The lower limit of the bracket (inclusive).
    pub lower: Decimal,
    /// The upper limit of the bracket (inclusive), or `None` when unbounded.
    pub upper: Option<Decimal>,
    /// The tax owed for all income below `lower`.
    pub fixed_quota: Decimal,
    /// The marginal rate applied to income above `lower`.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns true if `income` falls inside this bracket.
    pub fn contains(&self, income: Decimal) -> bool {
        income >= self.lower && self.upper.is_none_or(|upper| income <= upper)
    }
}

/// An ordered income-tax tariff (`isr_tariff.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTariff {
    /// A human-readable name for the tariff.
    #[serde(default)]
    pub name: String,
    /// The brackets in table order.
    pub brackets: Vec<TaxBracket>,
}

/// Which daily base a contribution component is computed on.
///
/// Configuration spells these as `"SBC"`, `"UMA"` and `"SBC_excess_3UMA"`.
/// Any other spelling is kept verbatim as [`BaseKind::Custom`] and computed
/// on the capped wage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BaseKind {
    /// The contribution base capped between the configured UMA multiples.
    CappedWage,
    /// The reference unit (UMA) value itself.
    ReferenceUnit,
    /// The part of the capped base above three reference units.
    ExcessOverThreshold,
    /// An unrecognized base, computed like [`BaseKind::CappedWage`].
    Custom(String),
}

impl BaseKind {
    /// Returns the configuration spelling of this base.
    pub fn as_str(&self) -> &str {
        match self {
            BaseKind::CappedWage => "SBC",
            BaseKind::ReferenceUnit => "UMA",
            BaseKind::ExcessOverThreshold => "SBC_excess_3UMA",
            BaseKind::Custom(name) => name,
        }
    }
}

impl From<String> for BaseKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SBC" => BaseKind::CappedWage,
            "UMA" => BaseKind::ReferenceUnit,
            "SBC_excess_3UMA" => BaseKind::ExcessOverThreshold,
            _ => BaseKind::Custom(value),
        }
    }
}

impl From<BaseKind> for String {
    fn from(value: BaseKind) -> Self {
        match value {
            BaseKind::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

fn default_min_base_multiple() -> Decimal {
    Decimal::ONE
}

fn default_max_base_multiple() -> Decimal {
    Decimal::from(25)
}

/// Global parameters of the contribution table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionParams {
    /// The daily reference unit (UMA) value. Must be positive; a missing
    /// value is read as zero and rejected at calculation time.
    #[serde(default)]
    pub reference_unit_value: Decimal,
    /// The contribution base floor, in reference units.
    #[serde(default = "default_min_base_multiple")]
    pub min_base_multiple: Decimal,
    /// The contribution base ceiling, in reference units.
    #[serde(default = "default_max_base_multiple")]
    pub max_base_multiple: Decimal,
}

/// One contribution line within an insurance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionComponent {
    /// The component name (e.g. "Cuota fija").
    pub component: String,
    /// The daily base the rates apply to.
    pub base: BaseKind,
    /// The employer's rate.
    pub employer_rate: Decimal,
    /// The employee's rate.
    pub employee_rate: Decimal,
    /// The federal government's rate.
    pub gov_rate: Decimal,
}

/// An insurance line (e.g. "Invalidez y vida") and its components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceConfig {
    /// The insurance name.
    pub name: String,
    /// The components in configuration order.
    pub components: Vec<ContributionComponent>,
}

/// The contribution rate table (`ss_rates.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRateConfig {
    /// Reference unit and base-capping parameters.
    pub params: ContributionParams,
    /// The insurance lines in configuration order.
    pub insurances: Vec<InsuranceConfig>,
}

fn default_lss1997_base_rate() -> Decimal {
    Decimal::new(35, 2)
}

fn default_voluntary_multiplier() -> Decimal {
    Decimal::new(15, 1)
}

/// Assumptions for the 1997-regime replacement-rate model.
///
/// The defaults are placeholder constants of a linear model awaiting
/// replacement by authoritative tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lss1997Assumptions {
    /// Replacement rate with no voluntary savings.
    #[serde(default = "default_lss1997_base_rate")]
    pub base_rate: Decimal,
    /// Replacement-rate points gained per unit of voluntary rate.
    #[serde(default = "default_voluntary_multiplier")]
    pub voluntary_multiplier: Decimal,
}

impl Default for Lss1997Assumptions {
    fn default() -> Self {
        Self {
            base_rate: default_lss1997_base_rate(),
            voluntary_multiplier: default_voluntary_multiplier(),
        }
    }
}

fn default_base_rate_at_65() -> Decimal {
    Decimal::new(75, 2)
}

fn default_penalty_per_year() -> Decimal {
    Decimal::new(6, 2)
}

fn default_full_pension_age() -> u32 {
    65
}

/// Assumptions for the 1973-regime replacement-rate model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lss1973Assumptions {
    /// Replacement rate when retiring at the full-pension age.
    #[serde(default = "default_base_rate_at_65")]
    pub base_rate_at_65: Decimal,
    /// Replacement rate lost per year of retirement before the full-pension age.
    #[serde(default = "default_penalty_per_year")]
    pub penalty_per_year: Decimal,
    /// The age from which no early-retirement penalty applies.
    #[serde(default = "default_full_pension_age")]
    pub full_pension_age: u32,
}

impl Default for Lss1973Assumptions {
    fn default() -> Self {
        Self {
            base_rate_at_65: default_base_rate_at_65(),
            penalty_per_year: default_penalty_per_year(),
            full_pension_age: default_full_pension_age(),
        }
    }
}

/// A document whose payload sits under a `params` key.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ParamsDocument<T> {
    #[serde(default)]
    pub params: T,
}

/// The complete engine configuration loaded from a configuration directory.
///
/// Built once and passed by reference into calculation functions.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    tariff: TaxTariff,
    contribution_rates: ContributionRateConfig,
    lss1997: Lss1997Assumptions,
    lss1973: Lss1973Assumptions,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        tariff: TaxTariff,
        contribution_rates: ContributionRateConfig,
        lss1997: Lss1997Assumptions,
        lss1973: Lss1973Assumptions,
    ) -> Self {
        Self {
            tariff,
            contribution_rates,
            lss1997,
            lss1973,
        }
    }

    /// Returns the income-tax tariff.
    pub fn tariff(&self) -> &TaxTariff {
        &self.tariff
    }

    /// Returns the contribution rate table.
    pub fn contribution_rates(&self) -> &ContributionRateConfig {
        &self.contribution_rates
    }

    /// Returns the 1997-regime assumptions.
    pub fn lss1997(&self) -> &Lss1997Assumptions {
        &self.lss1997
    }

    /// Returns the 1973-regime assumptions.
    pub fn lss1973(&self) -> &Lss1973Assumptions {
        &self.lss1973
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_base_kind_known_spellings() {
        assert_eq!(BaseKind::from("SBC".to_string()), BaseKind::CappedWage);
        assert_eq!(BaseKind::from("UMA".to_string()), BaseKind::ReferenceUnit);
        assert_eq!(
            BaseKind::from("SBC_excess_3UMA".to_string()),
            BaseKind::ExcessOverThreshold
        );
    }

    #[test]
    fn test_base_kind_unknown_spelling_is_custom() {
        let kind = BaseKind::from("SMG".to_string());
        assert_eq!(kind, BaseKind::Custom("SMG".to_string()));
        assert_eq!(kind.as_str(), "SMG");
    }

    #[test]
    fn test_base_kind_serializes_to_config_spelling() {
        let json = serde_json::to_string(&BaseKind::ExcessOverThreshold).unwrap();
        assert_eq!(json, "\"SBC_excess_3UMA\"");
    }

    #[test]
    fn test_bracket_contains_respects_inclusive_bounds() {
        let bracket = TaxBracket {
            lower: dec("644.58"),
            upper: Some(dec("5470.92")),
            fixed_quota: dec("12.38"),
            rate: dec("0.064"),
        };
        assert!(bracket.contains(dec("644.58")));
        assert!(bracket.contains(dec("5470.92")));
        assert!(!bracket.contains(dec("5470.93")));
        assert!(!bracket.contains(dec("644.57")));
    }

    #[test]
    fn test_unbounded_bracket_contains_large_income() {
        let bracket = TaxBracket {
            lower: dec("324845.01"),
            upper: None,
            fixed_quota: dec("102656.00"),
            rate: dec("0.35"),
        };
        assert!(bracket.contains(dec("10000000")));
    }

    #[test]
    fn test_contribution_params_default_multiples() {
        let params: ContributionParams =
            serde_yaml::from_str("reference_unit_value: 113.14").unwrap();
        assert_eq!(params.reference_unit_value, dec("113.14"));
        assert_eq!(params.min_base_multiple, Decimal::ONE);
        assert_eq!(params.max_base_multiple, Decimal::from(25));
    }

    #[test]
    fn test_component_requires_rates() {
        let result: Result<ContributionComponent, _> =
            serde_yaml::from_str("component: Retiro\nbase: SBC\nemployer_rate: 0.02\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_params_document_uses_placeholder_assumptions() {
        let doc: ParamsDocument<Lss1973Assumptions> = serde_yaml::from_str("{}").unwrap();
        assert_eq!(doc.params, Lss1973Assumptions::default());
        assert_eq!(doc.params.base_rate_at_65, dec("0.75"));
        assert_eq!(doc.params.penalty_per_year, dec("0.06"));
        assert_eq!(doc.params.full_pension_age, 65);
    }

    #[test]
    fn test_lss1997_defaults() {
        let assumptions = Lss1997Assumptions::default();
        assert_eq!(assumptions.base_rate, dec("0.35"));
        assert_eq!(assumptions.voluntary_multiplier, dec("1.5"));
    }
}
