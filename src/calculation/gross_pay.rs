//! Gross pay assembly.
//!
//! Gross pay is the base salary plus every bonus, the full value of every
//! benefit in kind and overtime pay, less the absence deduction. Taxability
//! flags do not affect gross pay. The result is not clamped: absences larger
//! than the other components give a negative gross pay and a warning.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{
    AuditStep, AuditWarning, BenefitLine, Bonus, BonusKind, BonusLine, EmployeeCompensation,
    GrossBreakdown,
};

use super::absence::compute_absence_deduction;
use super::overtime::compute_overtime_amount;
use super::rounding::round_to_cents;

/// Warning code raised when gross pay is negative.
pub const NEGATIVE_GROSS_PAY: &str = "NEGATIVE_GROSS_PAY";

/// The result of assembling gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossPayResult {
    /// Gross pay, rounded to 2 decimals.
    pub gross_pay: Decimal,
    /// Components of gross pay for display (amounts rounded to 2 decimals).
    pub breakdown: GrossBreakdown,
    /// Pay withheld for non-justified absences, rounded to 2 decimals.
    pub absence_deduction: Decimal,
    /// Audit steps for overtime, absences and gross pay, in that order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while assembling gross pay.
    pub warnings: Vec<AuditWarning>,
}

/// Resolves a bonus to a monetary amount.
///
/// Fixed bonuses are taken as-is; percentage bonuses are
/// `base_salary * amount / 100`. The result is unrounded.
pub fn bonus_amount(bonus: &Bonus, base_salary: Decimal) -> Decimal {
    match bonus.kind {
        BonusKind::Fixed => bonus.amount,
        BonusKind::PercentageOfBase => base_salary * bonus.amount / Decimal::ONE_HUNDRED,
    }
}

/// Returns the total of bonuses and benefits flagged as not taxable.
pub fn non_taxable_amount(input: &EmployeeCompensation) -> Decimal {
    let bonuses: Decimal = input
        .bonuses
        .iter()
        .filter(|bonus| !bonus.taxable)
        .map(|bonus| bonus_amount(bonus, input.base_salary))
        .sum();
    let benefits: Decimal = input
        .benefits_in_kind
        .iter()
        .filter(|benefit| !benefit.taxable)
        .map(|benefit| benefit.value)
        .sum();
    bonuses + benefits
}

/// Assembles gross pay from base salary, bonuses, benefits, overtime and absences.
///
/// # Arguments
///
/// * `input` - The employee's compensation for the month
/// * `step_number_start` - The first step number for audit trail sequencing;
///   three steps are produced (overtime, absences, gross pay)
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::compute_gross_pay;
/// use paie_engine::models::{BenefitInKind, Bonus, BonusKind, EmployeeCompensation};
/// use rust_decimal::Decimal;
///
/// let mut input = EmployeeCompensation::with_base_salary(Decimal::from(10000));
/// input.bonuses = vec![
///     Bonus {
///         name: "Rendement".into(),
///         amount: Decimal::from(800),
///         kind: BonusKind::Fixed,
///         taxable: true,
///     },
///     Bonus {
///         name: "Ancienneté".into(),
///         amount: Decimal::from(5),
///         kind: BonusKind::PercentageOfBase,
///         taxable: true,
///     },
/// ];
/// input.benefits_in_kind = vec![
///     BenefitInKind { name: "Logement".into(), value: Decimal::from(1500), taxable: true },
/// ];
///
/// let result = compute_gross_pay(&input, 1);
/// assert_eq!(result.gross_pay, Decimal::from(12800));
/// assert_eq!(result.breakdown.bonuses[1].amount, Decimal::from(500));
/// ```
pub fn compute_gross_pay(input: &EmployeeCompensation, step_number_start: u32) -> GrossPayResult {
    let overtime = compute_overtime_amount(input, step_number_start);
    let absences = compute_absence_deduction(input, step_number_start + 1);

    let bonus_lines: Vec<(BonusLine, Decimal)> = input
        .bonuses
        .iter()
        .map(|bonus| {
            let amount = bonus_amount(bonus, input.base_salary);
            let line = BonusLine {
                name: bonus.name.clone(),
                amount: round_to_cents(amount),
            };
            (line, amount)
        })
        .collect();
    let bonuses_total: Decimal = bonus_lines.iter().map(|(_, amount)| *amount).sum();
    let benefits_total: Decimal = input.benefits_in_kind.iter().map(|b| b.value).sum();

    let gross_pay = round_to_cents(
        input.base_salary + bonuses_total + benefits_total + overtime.amount - absences.amount,
    );

    let mut warnings = Vec::new();
    if gross_pay < Decimal::ZERO {
        warn!(
            employee_id = input.employee_id.as_deref().unwrap_or("-"),
            gross_pay = %gross_pay,
            "Absence deduction exceeds earnings, gross pay is negative"
        );
        warnings.push(AuditWarning::new(
            NEGATIVE_GROSS_PAY,
            format!(
                "Gross pay is {} because the absence deduction exceeds earnings",
                gross_pay
            ),
            "high",
        ));
    }

    let gross_step = AuditStep {
        step_number: step_number_start + 2,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay Assembly".to_string(),
        legal_ref: "CGI art. 56".to_string(),
        input: serde_json::json!({
            "base_salary": input.base_salary.to_string(),
            "bonuses": round_to_cents(bonuses_total).to_string(),
            "benefits": benefits_total.to_string(),
            "overtime": round_to_cents(overtime.amount).to_string(),
            "absence_deduction": round_to_cents(absences.amount).to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.to_string()
        }),
        reasoning: format!(
            "{} base + {} bonuses + {} benefits + {} overtime - {} absences = {}",
            input.base_salary,
            round_to_cents(bonuses_total),
            benefits_total,
            round_to_cents(overtime.amount),
            round_to_cents(absences.amount),
            gross_pay
        ),
    };

    let breakdown = GrossBreakdown {
        base_salary: input.base_salary,
        bonuses: bonus_lines.into_iter().map(|(line, _)| line).collect(),
        benefits: input
            .benefits_in_kind
            .iter()
            .map(|benefit| BenefitLine {
                name: benefit.name.clone(),
                value: benefit.value,
            })
            .collect(),
        overtime_amount: round_to_cents(overtime.amount),
    };

    GrossPayResult {
        gross_pay,
        breakdown,
        absence_deduction: round_to_cents(absences.amount),
        audit_steps: vec![overtime.audit_step, absences.audit_step, gross_step],
        warnings,
    }
}
