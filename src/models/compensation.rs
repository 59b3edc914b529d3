//! Compensation input models.
//!
//! An [`EmployeeCompensation`] is everything the engine needs to compute one
//! monthly payroll for one employee. It is assembled by the caller (HR data
//! entry, employee records) and never mutated by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest magnitude accepted for any amount, rate, hour or day count in a
/// compensation record (one billion).
///
/// The formulas multiply these values together; beyond this bound the
/// intermediate products can exceed what `Decimal` represents and the
/// arithmetic panics. [`EmployeeCompensation::validate_amounts`] enforces it.
pub const MAX_INPUT_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// How a bonus amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// The amount is a fixed monthly sum.
    Fixed,
    /// The amount is a percentage of the base salary.
    PercentageOfBase,
}

/// A bonus (prime) paid on top of the base salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    /// Display name of the bonus (e.g., "Prime de rendement").
    pub name: String,
    /// Fixed amount, or percentage of base salary depending on `kind`.
    pub amount: Decimal,
    /// How `amount` is interpreted.
    pub kind: BonusKind,
    /// Whether the bonus is subject to income tax.
    #[serde(default = "default_taxable")]
    pub taxable: bool,
}

/// A benefit in kind (avantage en nature) valued in money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitInKind {
    /// Display name of the benefit (e.g., "Véhicule de fonction").
    pub name: String,
    /// Monthly monetary value of the benefit.
    pub value: Decimal,
    /// Whether the benefit is subject to income tax.
    #[serde(default = "default_taxable")]
    pub taxable: bool,
}

fn default_taxable() -> bool {
    true
}

/// The time slot overtime was worked in.
///
/// The kind only determines which surcharge rate the caller supplies; the
/// overtime formula is the same for all kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeKind {
    /// Daytime overtime.
    Day,
    /// Night overtime.
    Night,
    /// Overtime on a weekly rest day or public holiday.
    Holiday,
}

/// A block of overtime hours at a given surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeEntry {
    /// The time slot the hours were worked in.
    pub kind: OvertimeKind,
    /// Number of overtime hours.
    pub hours: Decimal,
    /// Surcharge over the ordinary hourly rate, in percent (e.g., 25).
    pub surcharge_rate_percent: Decimal,
}

/// The category of an absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceKind {
    /// Justified absence, fully paid.
    Justified,
    /// Unjustified absence, deducted.
    Unjustified,
    /// Sick leave, deducted at the same daily rate as unjustified absence.
    Sickness,
    /// Unpaid leave, deducted.
    UnpaidLeave,
}

impl AbsenceKind {
    /// Returns true if days of this kind reduce pay.
    pub fn is_deducted(self) -> bool {
        self != AbsenceKind::Justified
    }
}

/// A number of absence days of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    /// The category of the absence.
    pub kind: AbsenceKind,
    /// Number of working days absent.
    pub days: Decimal,
}

/// An arbitrary post-tax deduction (loan repayment, advance, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Display name of the deduction.
    pub name: String,
    /// Amount withheld from net pay.
    pub amount: Decimal,
}

/// Membership of the complementary retirement scheme (CIMR).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplementaryRetirement {
    /// Whether contributions are due this month.
    pub active: bool,
    /// Employee contribution rate, in percent.
    pub employee_rate: Decimal,
    /// Employer contribution rate, in percent.
    pub employer_rate: Decimal,
    /// Optional contribution ceiling overriding the legal-parameter `cimr_cap`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<Decimal>,
}

/// One employee's compensation for one monthly payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCompensation {
    /// Optional caller-side identifier, used only to correlate results and logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Monthly base salary. At most [`MAX_INPUT_AMOUNT`] in magnitude.
    pub base_salary: Decimal,
    /// Years of seniority. Informational; no current formula uses it.
    #[serde(default)]
    pub seniority_years: u32,
    /// Bonuses, in display order.
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
    /// Benefits in kind, in display order.
    #[serde(default)]
    pub benefits_in_kind: Vec<BenefitInKind>,
    /// Overtime worked this month.
    #[serde(default)]
    pub overtime_entries: Vec<OvertimeEntry>,
    /// Absences this month.
    #[serde(default)]
    pub absences: Vec<Absence>,
    /// Post-tax deductions.
    #[serde(default)]
    pub deductions: Vec<Deduction>,
    /// Complementary retirement membership, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complementary_retirement: Option<ComplementaryRetirement>,
}

impl EmployeeCompensation {
    /// Creates a compensation record with only a base salary.
    ///
    /// # Examples
    ///
    /// ```
    /// use paie_engine::models::EmployeeCompensation;
    /// use rust_decimal::Decimal;
    ///
    /// let input = EmployeeCompensation::with_base_salary(Decimal::from(8000));
    /// assert!(input.bonuses.is_empty());
    /// assert!(input.complementary_retirement.is_none());
    /// ```
    pub fn with_base_salary(base_salary: Decimal) -> Self {
        Self {
            employee_id: None,
            base_salary,
            seniority_years: 0,
            bonuses: Vec::new(),
            benefits_in_kind: Vec::new(),
            overtime_entries: Vec::new(),
            absences: Vec::new(),
            deductions: Vec::new(),
            complementary_retirement: None,
        }
    }

    /// Checks that every numeric field is within [`MAX_INPUT_AMOUNT`].
    ///
    /// The calculation functions never call this; callers decoding
    /// untrusted records run it before computing.
    ///
    /// # Errors
    ///
    /// Returns a description naming the first field out of range.
    pub fn validate_amounts(&self) -> Result<(), String> {
        let mut fields = vec![("base_salary".to_string(), self.base_salary)];
        for (i, bonus) in self.bonuses.iter().enumerate() {
            fields.push((format!("bonuses[{}].amount", i), bonus.amount));
        }
        for (i, benefit) in self.benefits_in_kind.iter().enumerate() {
            fields.push((format!("benefits_in_kind[{}].value", i), benefit.value));
        }
        for (i, entry) in self.overtime_entries.iter().enumerate() {
            fields.push((format!("overtime_entries[{}].hours", i), entry.hours));
            fields.push((
                format!("overtime_entries[{}].surcharge_rate_percent", i),
                entry.surcharge_rate_percent,
            ));
        }
        for (i, absence) in self.absences.iter().enumerate() {
            fields.push((format!("absences[{}].days", i), absence.days));
        }
        for (i, deduction) in self.deductions.iter().enumerate() {
            fields.push((format!("deductions[{}].amount", i), deduction.amount));
        }
        if let Some(retirement) = &self.complementary_retirement {
            fields.push((
                "complementary_retirement.employee_rate".to_string(),
                retirement.employee_rate,
            ));
            fields.push((
                "complementary_retirement.employer_rate".to_string(),
                retirement.employer_rate,
            ));
            if let Some(cap) = retirement.cap {
                fields.push(("complementary_retirement.cap".to_string(), cap));
            }
        }

        match fields.into_iter().find(|(_, value)| value.abs() > MAX_INPUT_AMOUNT) {
            Some((name, value)) => Err(format!(
                "{} = {} exceeds the supported magnitude of {}",
                name, value, MAX_INPUT_AMOUNT
            )),
            None => Ok(()),
        }
    }

    /// Returns the CIMR membership if contributions are due this month.
    pub fn active_retirement(&self) -> Option<&ComplementaryRetirement> {
        self.complementary_retirement
            .as_ref()
            .filter(|retirement| retirement.active)
    }
}
