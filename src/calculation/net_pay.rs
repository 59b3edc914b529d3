//! Net pay calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::CalculationPolicy;
use crate::models::{AuditStep, AuditWarning, Deduction};

use super::rounding::round_to_cents;

/// Warning code raised when deductions push net pay below zero.
pub const NEGATIVE_NET_PAY: &str = "NEGATIVE_NET_PAY";

/// The result of the net pay calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPayResult {
    /// Net pay, rounded to 2 decimals.
    pub net_pay: Decimal,
    /// Sum of the post-tax deductions.
    pub other_deductions: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Raised when net pay came out negative.
    pub warning: Option<AuditWarning>,
}

/// Calculates `net_taxable_income + exempt_items - monthly_tax - Σ deductions`.
///
/// `exempt_items` is non-zero only when non-taxable items were removed from
/// the tax base; they are added back here since they are still paid. Net pay
/// is not floored unless `policy.floor_net_pay_at_zero` is set. A negative
/// net pay raises a warning either way.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::compute_net_pay;
/// use paie_engine::config::CalculationPolicy;
/// use paie_engine::models::Deduction;
/// use rust_decimal::Decimal;
///
/// let deductions = vec![Deduction { name: "Prêt".into(), amount: Decimal::from(500) }];
/// let result = compute_net_pay(
///     Decimal::from(9000),
///     Decimal::from(1000),
///     &deductions,
///     Decimal::ZERO,
///     &CalculationPolicy::default(),
///     1,
/// );
/// assert_eq!(result.net_pay, Decimal::from(7500));
/// ```
pub fn compute_net_pay(
    net_taxable_income: Decimal,
    monthly_tax: Decimal,
    deductions: &[Deduction],
    exempt_items: Decimal,
    policy: &CalculationPolicy,
    step_number: u32,
) -> NetPayResult {
    let other_deductions: Decimal = deductions.iter().map(|d| d.amount).sum();
    let computed =
        round_to_cents(net_taxable_income + exempt_items - monthly_tax - other_deductions);

    let mut warning = None;
    let net_pay = if computed < Decimal::ZERO {
        warn!(net_pay = %computed, "Deductions exceed pay, net pay is negative");
        let floored = policy.floor_net_pay_at_zero;
        warning = Some(AuditWarning::new(
            NEGATIVE_NET_PAY,
            if floored {
                format!("Net pay of {} was floored at zero", computed)
            } else {
                format!("Net pay is {} because deductions exceed pay", computed)
            },
            "high",
        ));
        if floored {
            round_to_cents(Decimal::ZERO)
        } else {
            computed
        }
    } else {
        computed
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        legal_ref: "Code du travail art. 370".to_string(),
        input: serde_json::json!({
            "net_taxable_income": net_taxable_income.to_string(),
            "exempt_items": exempt_items.to_string(),
            "income_tax": monthly_tax.to_string(),
            "other_deductions": other_deductions.to_string(),
            "deduction_count": deductions.len()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.to_string()
        }),
        reasoning: format!(
            "{} net taxable + {} exempt - {} income tax - {} other deductions = {}",
            net_taxable_income, exempt_items, monthly_tax, other_deductions, net_pay
        ),
    };

    NetPayResult {
        net_pay,
        other_deductions,
        audit_step,
        warning,
    }
}
