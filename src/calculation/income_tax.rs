//! Progressive income tax (IR) calculation.
//!
//! ## Method
//!
//! The monthly tax base is annualised, reduced by the professional-expenses
//! abatement, taxed with the bracket it falls into, and brought back to a
//! monthly figure:
//!
//! 1. `annual = monthly * 12`
//! 2. `abatement = min(annual * 20%, 30000)`
//! 3. `taxable = annual - abatement`
//! 4. find the bracket with `min < taxable <= max`
//! 5. `annual_tax = max(taxable * rate / 100 - amount_to_subtract, 0)`
//! 6. `monthly_tax = round(annual_tax / 12)`, to a whole dirham
//!
//! A taxable income that matches no bracket is charged no tax, unless the
//! strict policy is enabled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{LegalParameters, TaxBracket};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning};

use super::rounding::{round_half_up, round_to_cents};

/// Warning code raised when a positive taxable income matches no bracket.
pub const NO_MATCHING_BRACKET: &str = "NO_MATCHING_BRACKET";

/// Number of months in the tax year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The result of an income tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxResult {
    /// Monthly income tax, rounded to a whole amount.
    pub monthly_tax: Decimal,
    /// Annualised net taxable income, before abatement.
    pub annual_income: Decimal,
    /// Professional-expenses abatement.
    pub abatement: Decimal,
    /// Annual income after abatement, the amount looked up in the brackets.
    pub annual_taxable_income: Decimal,
    /// Annual tax before re-monthlisation.
    pub annual_tax: Decimal,
    /// The bracket applied, if any matched.
    pub bracket: Option<TaxBracket>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Raised when a positive income matched no bracket.
    pub warning: Option<AuditWarning>,
}

/// Returns `min(annual_income * rate / 100, cap)`.
pub fn professional_expenses_abatement(
    annual_income: Decimal,
    params: &LegalParameters,
) -> Decimal {
    (annual_income * params.professional_expenses_rate / Decimal::ONE_HUNDRED)
        .min(params.professional_expenses_cap)
}

/// Finds the bracket an annual taxable income falls into.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::find_bracket;
/// use paie_engine::config::LegalParameters;
/// use rust_decimal::Decimal;
///
/// let params = LegalParameters::morocco_2023();
/// let bracket = find_bracket(Decimal::from(50000), &params.tax_brackets).unwrap();
/// assert_eq!(bracket.rate, Decimal::from(10));
///
/// let bracket = find_bracket(Decimal::from(50001), &params.tax_brackets).unwrap();
/// assert_eq!(bracket.rate, Decimal::from(20));
///
/// assert!(find_bracket(Decimal::ZERO, &params.tax_brackets).is_none());
/// ```
pub fn find_bracket(
    annual_taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> Option<&TaxBracket> {
    brackets
        .iter()
        .find(|bracket| bracket.contains(annual_taxable_income))
}

/// Returns `max(income * rate / 100 - amount_to_subtract, 0)`.
pub fn annual_tax(annual_taxable_income: Decimal, bracket: &TaxBracket) -> Decimal {
    let tax =
        annual_taxable_income * bracket.rate / Decimal::ONE_HUNDRED - bracket.amount_to_subtract;
    tax.max(Decimal::ZERO)
}

/// Calculates the monthly income tax on a monthly net taxable income.
///
/// # Errors
///
/// Returns `NoMatchingBracket` only when `params.policy.strict_tax_brackets`
/// is set and a positive annual taxable income matches no bracket.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::compute_income_tax;
/// use paie_engine::config::LegalParameters;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let params = LegalParameters::morocco_2023();
/// let monthly = Decimal::from_str("9505.20").unwrap();
///
/// // 114062.40 annual, 22812.48 abatement, 91249.92 taxable at 34% - 17200
/// let result = compute_income_tax(monthly, &params, 1)?;
/// assert_eq!(result.monthly_tax, Decimal::from(1152));
/// # Ok::<(), paie_engine::error::EngineError>(())
/// ```
pub fn compute_income_tax(
    monthly_net_taxable_income: Decimal,
    params: &LegalParameters,
    step_number: u32,
) -> EngineResult<IncomeTaxResult> {
    let annual_income = monthly_net_taxable_income * MONTHS_PER_YEAR;
    let abatement = professional_expenses_abatement(annual_income, params);
    let annual_taxable_income = annual_income - abatement;

    let bracket = find_bracket(annual_taxable_income, &params.tax_brackets).cloned();

    let mut warning = None;
    if bracket.is_none() && annual_taxable_income > Decimal::ZERO {
        if params.policy.strict_tax_brackets {
            return Err(EngineError::NoMatchingBracket {
                annual_taxable_income,
            });
        }
        warn!(
            annual_taxable_income = %annual_taxable_income,
            "No tax bracket matches, charging no income tax"
        );
        warning = Some(AuditWarning::new(
            NO_MATCHING_BRACKET,
            format!(
                "Annual taxable income {} matches no tax bracket; no income tax charged",
                round_to_cents(annual_taxable_income)
            ),
            "high",
        ));
    }

    let annual_tax_amount = bracket
        .as_ref()
        .map_or(Decimal::ZERO, |b| annual_tax(annual_taxable_income, b));
    let monthly_tax = round_half_up(annual_tax_amount / MONTHS_PER_YEAR);

    let reasoning = match &bracket {
        Some(b) => format!(
            "Annual {} less abatement {} = {} taxed at {}% less {}: {} per year, {} per month",
            round_to_cents(annual_income),
            round_to_cents(abatement),
            round_to_cents(annual_taxable_income),
            b.rate,
            b.amount_to_subtract,
            round_to_cents(annual_tax_amount),
            monthly_tax
        ),
        None => format!(
            "Annual {} less abatement {} = {} matches no bracket: no tax",
            round_to_cents(annual_income),
            round_to_cents(abatement),
            round_to_cents(annual_taxable_income)
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Progressive Income Tax".to_string(),
        legal_ref: "CGI art. 59, 73".to_string(),
        input: serde_json::json!({
            "monthly_net_taxable_income": monthly_net_taxable_income.to_string(),
            "annual_income": round_to_cents(annual_income).to_string(),
            "abatement": round_to_cents(abatement).to_string(),
            "annual_taxable_income": round_to_cents(annual_taxable_income).to_string()
        }),
        output: serde_json::json!({
            "bracket_rate": bracket.as_ref().map(|b| b.rate.to_string()),
            "annual_tax": round_to_cents(annual_tax_amount).to_string(),
            "monthly_tax": monthly_tax.to_string()
        }),
        reasoning,
    };

    Ok(IncomeTaxResult {
        monthly_tax,
        annual_income,
        abatement,
        annual_taxable_income,
        annual_tax: annual_tax_amount,
        bracket,
        audit_step,
        warning,
    })
}
