//! Employee-side social contributions.
//!
//! - **CNSS** on gross pay capped at `cnss_cap`
//! - **AMO** on full gross pay, never capped
//! - **CIMR** only for active members, on gross pay capped at the member's
//!   own ceiling or else `cimr_cap`
//!
//! Each amount is `round(base * rate) / 100`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LegalParameters;
use crate::models::{AuditStep, EmployeeCompensation};

use super::rounding::percent_of;

/// The result of an employee contribution calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeContributionsResult {
    /// CNSS contribution.
    pub cnss: Decimal,
    /// AMO contribution.
    pub amo: Decimal,
    /// CIMR contribution, `None` when the employee is not an active member.
    pub cimr: Option<Decimal>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl EmployeeContributionsResult {
    /// Returns CNSS + AMO + CIMR.
    pub fn total(&self) -> Decimal {
        self.cnss + self.amo + self.cimr.unwrap_or(Decimal::ZERO)
    }
}

/// Returns `min(gross_pay, cap)`.
pub(crate) fn capped_base(gross_pay: Decimal, cap: Decimal) -> Decimal {
    gross_pay.min(cap)
}

/// Returns the CIMR base for a member: gross capped at the member's own
/// ceiling, or the legal one.
pub(crate) fn cimr_base(
    gross_pay: Decimal,
    member_cap: Option<Decimal>,
    params: &LegalParameters,
) -> Decimal {
    capped_base(gross_pay, member_cap.unwrap_or(params.cimr_cap))
}

/// Calculates the employee's CNSS, AMO and CIMR contributions.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::compute_employee_contributions;
/// use paie_engine::config::LegalParameters;
/// use paie_engine::models::EmployeeCompensation;
/// use rust_decimal::Decimal;
///
/// let params = LegalParameters::morocco_2023();
/// let input = EmployeeCompensation::with_base_salary(Decimal::from(25000));
///
/// let result = compute_employee_contributions(Decimal::from(25000), &input, &params, 1);
/// assert_eq!(result.cnss.to_string(), "268.80");
/// assert_eq!(result.amo.to_string(), "565.00");
/// assert!(result.cimr.is_none());
/// ```
pub fn compute_employee_contributions(
    gross_pay: Decimal,
    input: &EmployeeCompensation,
    params: &LegalParameters,
    step_number: u32,
) -> EmployeeContributionsResult {
    let cnss_base = capped_base(gross_pay, params.cnss_cap);
    let cnss = percent_of(cnss_base, params.cnss_employee_rate);
    let amo = percent_of(gross_pay, params.amo_employee_rate);

    let retirement = input.active_retirement();
    let retirement_base = retirement.map(|r| cimr_base(gross_pay, r.cap, params));
    let cimr = retirement
        .zip(retirement_base)
        .map(|(r, base)| percent_of(base, r.employee_rate));

    let cimr_text = cimr.map_or_else(|| "not applicable".to_string(), |c| c.to_string());

    let audit_step = AuditStep {
        step_number,
        rule_id: "employee_contributions".to_string(),
        rule_name: "Employee Social Contributions".to_string(),
        legal_ref: "Dahir 1-72-184 (CNSS), Loi 65-00 (AMO), CIMR".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "cnss_base": cnss_base.to_string(),
            "cnss_rate": params.cnss_employee_rate.to_string(),
            "amo_rate": params.amo_employee_rate.to_string(),
            "cimr_base": retirement_base.map(|b| b.to_string()),
            "cimr_rate": retirement.map(|r| r.employee_rate.to_string())
        }),
        output: serde_json::json!({
            "cnss": cnss.to_string(),
            "amo": amo.to_string(),
            "cimr": cimr.map(|c| c.to_string())
        }),
        reasoning: format!(
            "CNSS {}% of {} = {}; AMO {}% of {} = {}; CIMR {}",
            params.cnss_employee_rate,
            cnss_base,
            cnss,
            params.amo_employee_rate,
            gross_pay,
            amo,
            cimr_text
        ),
    };

    EmployeeContributionsResult {
        cnss,
        amo,
        cimr,
        audit_step,
    }
}
