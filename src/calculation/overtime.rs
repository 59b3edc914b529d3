//! Overtime pay calculation.
//!
//! Overtime is paid at the ordinary hourly rate plus a surcharge. The
//! ordinary hourly rate is the monthly base salary divided by
//! [`MONTHLY_STANDARD_HOURS`]. The surcharge percentage comes from each
//! entry, so day, night and holiday overtime share one formula.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, EmployeeCompensation};

use super::rounding::round_to_cents;

/// Statutory monthly hour equivalent of a 44-hour week.
pub const MONTHLY_STANDARD_HOURS: Decimal = Decimal::from_parts(191, 0, 0, false, 0);

/// The result of an overtime calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeResult {
    /// The ordinary hourly rate (`base_salary / 191`), unrounded.
    pub hourly_rate: Decimal,
    /// Total overtime pay, unrounded.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the overtime pay for all overtime entries.
///
/// Each entry contributes `hours * hourly_rate * (1 + surcharge / 100)`.
/// The amount is left unrounded; gross pay is rounded once at the end.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::compute_overtime_amount;
/// use paie_engine::models::{EmployeeCompensation, OvertimeEntry, OvertimeKind};
/// use rust_decimal::Decimal;
///
/// let mut input = EmployeeCompensation::with_base_salary(Decimal::from(10000));
/// input.overtime_entries.push(OvertimeEntry {
///     kind: OvertimeKind::Day,
///     hours: Decimal::from(10),
///     surcharge_rate_percent: Decimal::from(25),
/// });
///
/// let result = compute_overtime_amount(&input, 1);
/// assert_eq!(result.amount.round_dp(2).to_string(), "654.45");
/// ```
pub fn compute_overtime_amount(input: &EmployeeCompensation, step_number: u32) -> OvertimeResult {
    let hourly_rate = input.base_salary / MONTHLY_STANDARD_HOURS;

    let amount: Decimal = input
        .overtime_entries
        .iter()
        .map(|entry| {
            let multiplier =
                Decimal::ONE + entry.surcharge_rate_percent / Decimal::ONE_HUNDRED;
            entry.hours * hourly_rate * multiplier
        })
        .sum();

    let total_hours: Decimal = input.overtime_entries.iter().map(|e| e.hours).sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime".to_string(),
        rule_name: "Overtime Pay".to_string(),
        legal_ref: "Code du travail art. 201".to_string(),
        input: serde_json::json!({
            "base_salary": input.base_salary.to_string(),
            "entries": input.overtime_entries.len(),
            "total_hours": total_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": round_to_cents(hourly_rate).to_string(),
            "amount": round_to_cents(amount).to_string()
        }),
        reasoning: format!(
            "{} overtime hours at hourly rate {} / {} with per-entry surcharge: {}",
            total_hours.normalize(),
            input.base_salary,
            MONTHLY_STANDARD_HOURS,
            round_to_cents(amount)
        ),
    };

    OvertimeResult {
        hourly_rate,
        amount,
        audit_step,
    }
}
