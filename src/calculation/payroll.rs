//! Monthly payroll summary.
//!
//! Combines ISR withholding, social-security contributions and effective
//! rates for one worker into a single result with an audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, AuditWarning};

use super::contributions::{ContributionBreakdown, compute_contributions};
use super::effective_rate::{EffectiveRates, effective_rates};
use super::income_tax::{BracketSelection, TaxResult, evaluate_income_tax};

/// Default number of days contributed for in a month.
pub const DEFAULT_DAYS_IN_MONTH: u32 = 30;

/// The monthly payroll figures for one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// ISR on the monthly salary.
    pub income_tax: TaxResult,
    /// IMSS and INFONAVIT contributions on the daily contribution base.
    pub contributions: ContributionBreakdown,
    /// The base the effective rates are computed against.
    pub reference_base: Decimal,
    /// ISR and total contributions over `reference_base`.
    pub effective_rates: EffectiveRates,
    /// The decisions behind the figures.
    pub audit_trace: AuditTrace,
}

/// Computes the monthly payroll summary.
///
/// The effective-rate base is the monthly contribution wage
/// (`sbc_daily * days_in_month`), or `salary_monthly` when that is zero.
///
/// # Errors
///
/// Propagates every error of [`evaluate_income_tax`] and
/// [`compute_contributions`]. `InvalidInput` when the monthly contribution
/// wage overflows a `Decimal`.
pub fn calculate_payroll(
    config: &EngineConfig,
    salary_monthly: Decimal,
    sbc_daily: Decimal,
    days_in_month: u32,
) -> EngineResult<PayrollSummary> {
    let mut trace = AuditTrace::default();

    let income_tax = evaluate_income_tax(salary_monthly, &config.tariff().brackets)?;
    trace.steps.push(income_tax_step(1, salary_monthly, &income_tax));
    if income_tax.selection == BracketSelection::FallbackToLast {
        trace.warnings.push(AuditWarning {
            code: "BRACKET_FALLBACK".to_string(),
            message: format!(
                "No tariff bracket contains income ${}; the last bracket was used",
                salary_monthly
            ),
            severity: "medium".to_string(),
        });
    }

    let contributions =
        compute_contributions(sbc_daily, days_in_month, config.contribution_rates())?;
    trace
        .steps
        .push(contributions_step(2, sbc_daily, &contributions));

    let contribution_wage = sbc_daily
        .checked_mul(Decimal::from(days_in_month))
        .ok_or_else(|| {
            EngineError::invalid_input(
                "sbc_daily",
                format!("{} is too large for a monthly contribution wage", sbc_daily),
            )
        })?;
    let reference_base = if contribution_wage > Decimal::ZERO {
        contribution_wage
    } else {
        salary_monthly
    };
    let rates = effective_rates(
        reference_base,
        income_tax.tax,
        contributions.totals.grand_total,
    );
    trace.steps.push(AuditStep {
        step_number: 3,
        rule_id: "effective_rates".to_string(),
        rule_name: "Effective Rates".to_string(),
        legal_ref: "n/a".to_string(),
        input: serde_json::json!({
            "reference_base": reference_base.normalize().to_string(),
            "tax": income_tax.tax.normalize().to_string(),
            "contribution_total": contributions.totals.grand_total.normalize().to_string()
        }),
        output: serde_json::json!({
            "tax_effective_rate": rates.tax_effective_rate.normalize().to_string(),
            "contribution_effective_rate": rates.contribution_effective_rate.normalize().to_string()
        }),
        reasoning: if reference_base > Decimal::ZERO {
            format!(
                "${} / ${} and ${} / ${}",
                income_tax.tax.round_dp(2),
                reference_base.round_dp(2),
                contributions.totals.grand_total.round_dp(2),
                reference_base.round_dp(2)
            )
        } else {
            "Reference base is zero; effective rates reported as zero".to_string()
        },
    });

    Ok(PayrollSummary {
        income_tax,
        contributions,
        reference_base,
        effective_rates: rates,
        audit_trace: trace,
    })
}

fn income_tax_step(step_number: u32, income: Decimal, result: &TaxResult) -> AuditStep {
    let upper = result
        .upper
        .map(|u| u.normalize().to_string())
        .unwrap_or_else(|| "unbounded".to_string());
    let selection = match result.selection {
        BracketSelection::Matched { .. } => "matched",
        BracketSelection::FallbackToLast => "fallback_to_last",
    };

    AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "ISR Withholding".to_string(),
        legal_ref: "LISR art. 96".to_string(),
        input: serde_json::json!({
            "gross_monthly_income": income.normalize().to_string()
        }),
        output: serde_json::json!({
            "tax": result.tax.normalize().to_string(),
            "lower": result.lower.normalize().to_string(),
            "upper": upper,
            "fixed_quota": result.fixed_quota.normalize().to_string(),
            "rate": result.rate.normalize().to_string(),
            "selection": selection
        }),
        reasoning: format!(
            "${} + ${} x {} = ${}",
            result.fixed_quota.normalize(),
            result.excess.normalize(),
            result.rate.normalize(),
            result.tax.round_dp(2)
        ),
    }
}

fn contributions_step(
    step_number: u32,
    sbc_daily: Decimal,
    breakdown: &ContributionBreakdown,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "social_security_contributions".to_string(),
        rule_name: "IMSS and INFONAVIT Contributions".to_string(),
        legal_ref: "LSS arts. 25, 28, 106, 168; LINFONAVIT art. 29".to_string(),
        input: serde_json::json!({
            "sbc_daily": sbc_daily.normalize().to_string(),
            "days_in_month": breakdown.days_in_month,
            "reference_unit_value": breakdown.reference_unit_value.normalize().to_string()
        }),
        output: serde_json::json!({
            "capped_daily_base": breakdown.capped_daily_base.normalize().to_string(),
            "components": breakdown.rows.len(),
            "employer_total": breakdown.totals.employer_total.round_dp(2).to_string(),
            "employee_total": breakdown.totals.employee_total.round_dp(2).to_string(),
            "gov_total": breakdown.totals.gov_total.round_dp(2).to_string(),
            "grand_total": breakdown.totals.grand_total.round_dp(2).to_string()
        }),
        reasoning: if breakdown.capped_daily_base == sbc_daily {
            format!(
                "{} components over {} days on SBC ${}",
                breakdown.rows.len(),
                breakdown.days_in_month,
                sbc_daily.normalize()
            )
        } else {
            format!(
                "SBC ${} capped to ${}; {} components over {} days",
                sbc_daily.normalize(),
                breakdown.capped_daily_base.normalize(),
                breakdown.rows.len(),
                breakdown.days_in_month
            )
        },
    }
}
