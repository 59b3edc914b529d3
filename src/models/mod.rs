//! Core data models for the payroll engine.
//!
//! Inputs describe one employee's compensation for one month; results are
//! value objects produced once per computation.

mod compensation;
mod payroll_result;

pub use compensation::{
    Absence, AbsenceKind, BenefitInKind, Bonus, BonusKind, ComplementaryRetirement, Deduction,
    EmployeeCompensation, MAX_INPUT_AMOUNT, OvertimeEntry, OvertimeKind,
};
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, BenefitLine, BonusLine, Contributions,
    DeductionBreakdown, EmployerCost, GrossBreakdown, PayrollResult,
};
