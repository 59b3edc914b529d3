//! Monthly payroll orchestration.
//!
//! Runs every stage in order (gross pay, employee contributions, net
//! taxable income, income tax, net pay, employer cost) and assembles the
//! breakdowns and audit trace into a [`PayrollResult`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::LegalParameters;
use crate::error::EngineResult;
use crate::models::{
    AuditTrace, AuditWarning, Contributions, DeductionBreakdown, EmployeeCompensation,
    PayrollResult,
};

use super::employer_cost::compute_employer_cost;
use super::gross_pay::{compute_gross_pay, non_taxable_amount};
use super::income_tax::compute_income_tax;
use super::net_pay::compute_net_pay;
use super::net_taxable::compute_net_taxable_income;
use super::social_contributions::compute_employee_contributions;

/// Warning code raised when the base salary is below the legal minimum wage.
pub const BELOW_MINIMUM_WAGE: &str = "BELOW_MINIMUM_WAGE";

/// Computes one employee's monthly payroll.
///
/// The function is pure: identical inputs and parameters always give an
/// identical result, and nothing outside the arguments is read.
///
/// # Errors
///
/// Only fails when `params.policy.strict_tax_brackets` is set and the
/// annual taxable income matches no bracket.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::compute_payroll;
/// use paie_engine::config::LegalParameters;
/// use paie_engine::models::EmployeeCompensation;
/// use rust_decimal::Decimal;
///
/// let params = LegalParameters::morocco_2023();
/// let input = EmployeeCompensation::with_base_salary(Decimal::from(10000));
///
/// let result = compute_payroll(&input, &params)?;
/// assert_eq!(result.gross_pay.to_string(), "10000.00");
/// assert_eq!(result.net_taxable_income.to_string(), "9505.20");
/// assert_eq!(result.contributions.income_tax, Decimal::from(1152));
/// assert_eq!(result.net_pay.to_string(), "8353.20");
/// # Ok::<(), paie_engine::error::EngineError>(())
/// ```
pub fn compute_payroll(
    input: &EmployeeCompensation,
    params: &LegalParameters,
) -> EngineResult<PayrollResult> {
    let employee_id = input.employee_id.as_deref().unwrap_or("-");
    let mut trace = AuditTrace::default();

    if input.base_salary < params.minimum_wage {
        trace.warnings.push(AuditWarning::new(
            BELOW_MINIMUM_WAGE,
            format!(
                "Base salary {} is below the minimum wage of {}",
                input.base_salary, params.minimum_wage
            ),
            "low",
        ));
    }

    let gross = compute_gross_pay(input, 1);
    let gross_pay = gross.gross_pay;
    debug!(employee_id, gross_pay = %gross_pay, "Gross pay assembled");
    trace.steps.extend(gross.audit_steps);
    trace.warnings.extend(gross.warnings);

    let contributions = compute_employee_contributions(gross_pay, input, params, 4);
    let social_total = contributions.total();
    debug!(employee_id, social_contributions = %social_total, "Employee contributions computed");

    let exempt_items = if params.policy.exempt_non_taxable_items {
        non_taxable_amount(input)
    } else {
        Decimal::ZERO
    };
    let net_taxable = compute_net_taxable_income(gross_pay, &contributions, exempt_items, 5);
    let net_taxable_income = net_taxable.net_taxable_income;

    let income_tax = compute_income_tax(net_taxable_income, params, 6)?;
    let monthly_tax = income_tax.monthly_tax;
    debug!(
        employee_id,
        net_taxable_income = %net_taxable_income,
        income_tax = %monthly_tax,
        "Income tax computed"
    );

    let net = compute_net_pay(
        net_taxable_income,
        monthly_tax,
        &input.deductions,
        exempt_items,
        &params.policy,
        7,
    );
    let employer = compute_employer_cost(gross_pay, input, params, 8);

    trace.steps.push(contributions.audit_step);
    trace.steps.push(net_taxable.audit_step);
    trace.steps.push(income_tax.audit_step);
    trace.steps.push(net.audit_step);
    trace.steps.push(employer.audit_step);
    trace.warnings.extend(income_tax.warning);
    trace.warnings.extend(net.warning);

    debug!(
        employee_id,
        gross_pay = %gross_pay,
        net_pay = %net.net_pay,
        warnings = trace.warnings.len(),
        "Payroll computed"
    );

    Ok(PayrollResult {
        employee_id: input.employee_id.clone(),
        gross_pay,
        net_taxable_income,
        net_pay: net.net_pay,
        contributions: Contributions {
            cnss: contributions.cnss,
            amo: contributions.amo,
            income_tax: monthly_tax,
            cimr: contributions.cimr,
        },
        gross_breakdown: gross.breakdown,
        deduction_breakdown: DeductionBreakdown {
            social_contributions: social_total,
            income_tax: monthly_tax,
            other_deductions: net.other_deductions,
            absence_deduction: gross.absence_deduction,
        },
        employer_cost: employer.cost,
        audit_trace: trace,
    })
}
