//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and the structures that
//! break it down: employee contributions, gross and deduction breakdowns,
//! employer cost, and the audit trace recording every calculation step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee-side monthly contributions and income tax.
///
/// `cimr` is `None` when the employee is not an active member of the
/// complementary retirement scheme. This is distinct from a zero contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributions {
    /// CNSS (social security) contribution, on the capped base.
    pub cnss: Decimal,
    /// AMO (compulsory health insurance) contribution, on full gross pay.
    pub amo: Decimal,
    /// Monthly income tax (IR), rounded to a whole amount.
    pub income_tax: Decimal,
    /// CIMR (complementary retirement) contribution, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cimr: Option<Decimal>,
}

impl Contributions {
    /// Returns the sum of the social contributions (CNSS, AMO and CIMR).
    ///
    /// Income tax is not included.
    pub fn social_total(&self) -> Decimal {
        self.cnss + self.amo + self.cimr.unwrap_or(Decimal::ZERO)
    }
}

/// A bonus as it appears on the payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusLine {
    /// Display name of the bonus.
    pub name: String,
    /// Resolved monetary amount (percentage bonuses converted to money).
    pub amount: Decimal,
}

/// A benefit in kind as it appears on the payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitLine {
    /// Display name of the benefit.
    pub name: String,
    /// Monetary value of the benefit.
    pub value: Decimal,
}

/// The components that make up gross pay, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossBreakdown {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Each bonus with its resolved amount.
    pub bonuses: Vec<BonusLine>,
    /// Each benefit in kind with its value.
    pub benefits: Vec<BenefitLine>,
    /// Total overtime pay.
    pub overtime_amount: Decimal,
}

/// The amounts withheld between gross and net pay, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Sum of CNSS, AMO and CIMR employee contributions.
    pub social_contributions: Decimal,
    /// Monthly income tax.
    pub income_tax: Decimal,
    /// Sum of post-tax deductions.
    pub other_deductions: Decimal,
    /// Pay withheld for non-justified absences (already netted out of gross).
    pub absence_deduction: Decimal,
}

/// The employer's contribution burden. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCost {
    /// Employer CNSS contribution, on the capped base.
    pub cnss: Decimal,
    /// Employer AMO contribution, on full gross pay.
    pub amo: Decimal,
    /// Employer CIMR contribution, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cimr: Option<Decimal>,
    /// Sum of the present components.
    pub total: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the legal text behind this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that were computed but deserve attention, such as
/// a negative net pay. They never change the computed amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium" or "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use paie_engine::models::AuditTrace;
///
/// let trace = AuditTrace::default();
/// assert!(trace.steps.is_empty());
/// assert!(!trace.has_warning("NEGATIVE_NET_PAY"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The complete result of one monthly payroll computation.
///
/// Produced once per call and never mutated. Contains no timestamps or
/// generated identifiers, so identical inputs give identical results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Caller-side identifier copied from the input, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Gross pay after overtime and absences, rounded to 2 decimals.
    pub gross_pay: Decimal,
    /// Gross pay less social contributions, rounded to 2 decimals.
    pub net_taxable_income: Decimal,
    /// Amount paid to the employee, rounded to 2 decimals.
    pub net_pay: Decimal,
    /// Employee-side contributions and income tax.
    pub contributions: Contributions,
    /// Components of gross pay.
    pub gross_breakdown: GrossBreakdown,
    /// Components withheld between gross and net pay.
    pub deduction_breakdown: DeductionBreakdown,
    /// The employer's contribution burden.
    pub employer_cost: EmployerCost,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_contributions(cimr: Option<Decimal>) -> Contributions {
        Contributions {
            cnss: dec("268.80"),
            amo: dec("226.00"),
            income_tax: dec("1234"),
            cimr,
        }
    }

    #[test]
    fn test_social_total_excludes_income_tax() {
        let contributions = sample_contributions(None);
        assert_eq!(contributions.social_total(), dec("494.80"));
    }

    #[test]
    fn test_social_total_includes_cimr_when_present() {
        let contributions = sample_contributions(Some(dec("300.00")));
        assert_eq!(contributions.social_total(), dec("794.80"));
    }

    #[test]
    fn test_absent_cimr_is_omitted_from_json() {
        let json = serde_json::to_string(&sample_contributions(None)).unwrap();
        assert!(json.contains("\"cnss\":\"268.80\""));
        assert!(!json.contains("cimr"));
    }

    #[test]
    fn test_zero_cimr_is_kept_in_json() {
        let json = serde_json::to_string(&sample_contributions(Some(Decimal::ZERO))).unwrap();
        assert!(json.contains("\"cimr\":\"0\""));
    }

    #[test]
    fn test_employer_cost_deserializes_without_cimr() {
        let json = r#"{ "cnss": "538.80", "amo": "411.00", "total": "949.80" }"#;

        let cost: EmployerCost = serde_json::from_str(json).unwrap();
        assert_eq!(cost.cimr, None);
        assert_eq!(cost.total, dec("949.80"));
    }

    #[test]
    fn test_audit_trace_has_warning() {
        let trace = AuditTrace {
            steps: vec![],
            warnings: vec![AuditWarning::new(
                "NEGATIVE_NET_PAY",
                "Net pay is negative",
                "high",
            )],
        };

        assert!(trace.has_warning("NEGATIVE_NET_PAY"));
        assert!(!trace.has_warning("NEGATIVE_GROSS_PAY"));
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "gross_pay".to_string(),
            rule_name: "Gross Pay Assembly".to_string(),
            legal_ref: "Code du travail art. 345".to_string(),
            input: serde_json::json!({"base_salary": "10000"}),
            output: serde_json::json!({"gross_pay": "12800.00"}),
            reasoning: "Base plus bonuses and benefits".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"gross_pay\""));
        assert!(json.contains("\"legal_ref\":\"Code du travail art. 345\""));
    }
}
