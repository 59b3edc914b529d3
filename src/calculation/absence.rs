//! Absence deduction calculation.
//!
//! Non-justified absences are withheld at the daily rate, which is the
//! monthly base salary divided by [`MONTHLY_WORKING_DAYS`]. Justified
//! absences are paid in full. Sick leave is deducted like any other
//! non-justified absence; no partial-pay rule applies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, EmployeeCompensation};

use super::rounding::round_to_cents;

/// Statutory number of working days in a month.
pub const MONTHLY_WORKING_DAYS: Decimal = Decimal::from_parts(26, 0, 0, false, 0);

/// The result of an absence deduction calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceDeductionResult {
    /// The daily rate (`base_salary / 26`), unrounded.
    pub daily_rate: Decimal,
    /// Number of days withheld.
    pub deducted_days: Decimal,
    /// Total amount withheld, unrounded.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the pay withheld for non-justified absences.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::compute_absence_deduction;
/// use paie_engine::models::{Absence, AbsenceKind, EmployeeCompensation};
/// use rust_decimal::Decimal;
///
/// let mut input = EmployeeCompensation::with_base_salary(Decimal::from(2600));
/// input.absences = vec![
///     Absence { kind: AbsenceKind::Justified, days: Decimal::from(5) },
///     Absence { kind: AbsenceKind::Unjustified, days: Decimal::from(2) },
/// ];
///
/// let result = compute_absence_deduction(&input, 1);
/// assert_eq!(result.amount, Decimal::from(200));
/// ```
pub fn compute_absence_deduction(
    input: &EmployeeCompensation,
    step_number: u32,
) -> AbsenceDeductionResult {
    let daily_rate = input.base_salary / MONTHLY_WORKING_DAYS;

    let deducted_days: Decimal = input
        .absences
        .iter()
        .filter(|absence| absence.kind.is_deducted())
        .map(|absence| absence.days)
        .sum();

    let amount: Decimal = input
        .absences
        .iter()
        .filter(|absence| absence.kind.is_deducted())
        .map(|absence| absence.days * daily_rate)
        .sum();

    let paid_days: Decimal = input
        .absences
        .iter()
        .filter(|absence| !absence.kind.is_deducted())
        .map(|absence| absence.days)
        .sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "absence_deduction".to_string(),
        rule_name: "Absence Deduction".to_string(),
        legal_ref: "Code du travail (absences)".to_string(),
        input: serde_json::json!({
            "base_salary": input.base_salary.to_string(),
            "deducted_days": deducted_days.normalize().to_string(),
            "justified_days": paid_days.normalize().to_string()
        }),
        output: serde_json::json!({
            "daily_rate": round_to_cents(daily_rate).to_string(),
            "amount": round_to_cents(amount).to_string()
        }),
        reasoning: format!(
            "{} non-justified days at {} / {} per day withheld; {} justified days paid",
            deducted_days.normalize(),
            input.base_salary,
            MONTHLY_WORKING_DAYS,
            paid_days.normalize()
        ),
    };

    AbsenceDeductionResult {
        daily_rate,
        deducted_days,
        amount,
        audit_step,
    }
}
