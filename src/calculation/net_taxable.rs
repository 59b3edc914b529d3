//! Net taxable income.
//!
//! The income-tax base is gross pay less the employee's social
//! contributions. Income tax itself is not deducted from this base.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

use super::rounding::round_to_cents;
use super::social_contributions::EmployeeContributionsResult;

/// The result of the net taxable income calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetTaxableIncomeResult {
    /// Monthly net taxable income, rounded to 2 decimals.
    pub net_taxable_income: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates `gross_pay - (cnss + amo + cimr) - exempt_items`.
///
/// `exempt_items` is the total of non-taxable bonuses and benefits when the
/// calculation policy exempts them, and zero otherwise.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::{compute_employee_contributions, compute_net_taxable_income};
/// use paie_engine::config::LegalParameters;
/// use paie_engine::models::EmployeeCompensation;
/// use rust_decimal::Decimal;
///
/// let params = LegalParameters::morocco_2023();
/// let input = EmployeeCompensation::with_base_salary(Decimal::from(10000));
/// let gross = Decimal::from(10000);
/// let contributions = compute_employee_contributions(gross, &input, &params, 1);
///
/// let result = compute_net_taxable_income(gross, &contributions, Decimal::ZERO, 2);
/// // 10000 - 268.80 - 226.00
/// assert_eq!(result.net_taxable_income.to_string(), "9505.20");
/// ```
pub fn compute_net_taxable_income(
    gross_pay: Decimal,
    contributions: &EmployeeContributionsResult,
    exempt_items: Decimal,
    step_number: u32,
) -> NetTaxableIncomeResult {
    let social_total = contributions.total();
    let net_taxable_income = round_to_cents(gross_pay - social_total - exempt_items);

    let reasoning = if exempt_items.is_zero() {
        format!(
            "{} gross - {} social contributions = {}",
            gross_pay, social_total, net_taxable_income
        )
    } else {
        format!(
            "{} gross - {} social contributions - {} exempt items = {}",
            gross_pay, social_total, exempt_items, net_taxable_income
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_taxable_income".to_string(),
        rule_name: "Net Taxable Income".to_string(),
        legal_ref: "CGI art. 57, 59".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "social_contributions": social_total.to_string(),
            "exempt_items": exempt_items.to_string()
        }),
        output: serde_json::json!({
            "net_taxable_income": net_taxable_income.to_string()
        }),
        reasoning,
    };

    NetTaxableIncomeResult {
        net_taxable_income,
        audit_step,
    }
}
