//! Employer contribution burden.
//!
//! Mirrors the employee contributions with the employer rates. The result is
//! informational and never reduces net pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LegalParameters;
use crate::models::{AuditStep, EmployeeCompensation, EmployerCost};

use super::rounding::percent_of;
use super::social_contributions::{capped_base, cimr_base};

/// The result of the employer cost calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCostResult {
    /// The employer's contributions and their total.
    pub cost: EmployerCost,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the employer's CNSS, AMO and CIMR contributions.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::compute_employer_cost;
/// use paie_engine::config::LegalParameters;
/// use paie_engine::models::EmployeeCompensation;
/// use rust_decimal::Decimal;
///
/// let params = LegalParameters::morocco_2023();
/// let input = EmployeeCompensation::with_base_salary(Decimal::from(10000));
///
/// let result = compute_employer_cost(Decimal::from(10000), &input, &params, 1);
/// assert_eq!(result.cost.cnss.to_string(), "538.80");
/// assert_eq!(result.cost.amo.to_string(), "411.00");
/// assert_eq!(result.cost.total.to_string(), "949.80");
/// ```
pub fn compute_employer_cost(
    gross_pay: Decimal,
    input: &EmployeeCompensation,
    params: &LegalParameters,
    step_number: u32,
) -> EmployerCostResult {
    let cnss_base = capped_base(gross_pay, params.cnss_cap);
    let cnss = percent_of(cnss_base, params.cnss_employer_rate);
    let amo = percent_of(gross_pay, params.amo_employer_rate);
    let cimr = input
        .active_retirement()
        .map(|r| percent_of(cimr_base(gross_pay, r.cap, params), r.employer_rate));
    let total = cnss + amo + cimr.unwrap_or(Decimal::ZERO);

    let audit_step = AuditStep {
        step_number,
        rule_id: "employer_cost".to_string(),
        rule_name: "Employer Contributions".to_string(),
        legal_ref: "Dahir 1-72-184 (CNSS), Loi 65-00 (AMO), CIMR".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "cnss_base": cnss_base.to_string(),
            "cnss_rate": params.cnss_employer_rate.to_string(),
            "amo_rate": params.amo_employer_rate.to_string(),
            "cimr_rate": input.active_retirement().map(|r| r.employer_rate.to_string())
        }),
        output: serde_json::json!({
            "cnss": cnss.to_string(),
            "amo": amo.to_string(),
            "cimr": cimr.map(|c| c.to_string()),
            "total": total.to_string()
        }),
        reasoning: format!(
            "Employer CNSS {} + AMO {}{} = {}",
            cnss,
            amo,
            cimr.map(|c| format!(" + CIMR {}", c)).unwrap_or_default(),
            total
        ),
    };

    EmployerCostResult {
        cost: EmployerCost {
            cnss,
            amo,
            cimr,
            total,
        },
        audit_step,
    }
}
