//! Calculation logic for the payroll engine.
//!
//! This module contains the calculation functions for one month of pay:
//! overtime and absence adjustments, gross pay assembly, employee social
//! contributions, net taxable income, progressive income tax, net pay,
//! employer cost, and the orchestration that chains them together.

mod absence;
mod batch;
mod employer_cost;
mod gross_pay;
mod income_tax;
mod net_pay;
mod net_taxable;
mod overtime;
mod payroll;
mod rounding;
mod social_contributions;

pub use absence::{AbsenceDeductionResult, MONTHLY_WORKING_DAYS, compute_absence_deduction};
pub use batch::compute_payroll_batch;
pub use employer_cost::{EmployerCostResult, compute_employer_cost};
pub use gross_pay::{
    GrossPayResult, NEGATIVE_GROSS_PAY, bonus_amount, compute_gross_pay, non_taxable_amount,
};
pub use income_tax::{
    IncomeTaxResult, MONTHS_PER_YEAR, NO_MATCHING_BRACKET, annual_tax, compute_income_tax,
    find_bracket, professional_expenses_abatement,
};
pub use net_pay::{NEGATIVE_NET_PAY, NetPayResult, compute_net_pay};
pub use net_taxable::{NetTaxableIncomeResult, compute_net_taxable_income};
pub use overtime::{MONTHLY_STANDARD_HOURS, OvertimeResult, compute_overtime_amount};
pub use payroll::{BELOW_MINIMUM_WAGE, compute_payroll};
pub use rounding::{percent_of, round_half_up, round_to_cents};
pub use social_contributions::{EmployeeContributionsResult, compute_employee_contributions};
