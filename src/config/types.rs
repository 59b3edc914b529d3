//! Legal-parameter types.
//!
//! This module contains the strongly-typed structures that describe the
//! rates, ceilings and tax brackets of one legal year. They are deserialized
//! from YAML configuration files or built in code.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of the progressive income-tax table.
///
/// An annual taxable income belongs to the bracket when
/// `min < income <= max`, or `min < income` when `max` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Exclusive lower bound of the band (annual).
    pub min: Decimal,
    /// Inclusive upper bound of the band, `None` for "and above".
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Marginal rate, in percent.
    pub rate: Decimal,
    /// Amount subtracted from `income * rate / 100` (somme à déduire).
    pub amount_to_subtract: Decimal,
}

impl TaxBracket {
    /// Returns true if the annual taxable income falls in this bracket.
    pub fn contains(&self, income: Decimal) -> bool {
        income > self.min && self.max.is_none_or(|max| income <= max)
    }
}

/// Switches for behaviours the legal texts leave open.
///
/// Every flag defaults to `false`, which reproduces the historical payslip
/// figures exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationPolicy {
    /// Clamp net pay at zero instead of reporting a negative amount.
    pub floor_net_pay_at_zero: bool,
    /// Fail with `NoMatchingBracket` instead of charging no tax when a
    /// positive annual income matches no bracket.
    pub strict_tax_brackets: bool,
    /// Remove non-taxable bonuses and benefits from the income-tax base.
    pub exempt_non_taxable_items: bool,
}

/// Rates, ceilings and tax brackets in force for one legal year.
///
/// All rates are percentages (e.g., `4.48` for 4.48%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalParameters {
    /// Monthly statutory minimum wage (SMIG). Informational, never enforced.
    pub minimum_wage: Decimal,
    /// Monthly CNSS contribution ceiling.
    pub cnss_cap: Decimal,
    /// Employee CNSS rate.
    pub cnss_employee_rate: Decimal,
    /// Employer CNSS rate.
    pub cnss_employer_rate: Decimal,
    /// Employee AMO rate.
    pub amo_employee_rate: Decimal,
    /// Employer AMO rate.
    pub amo_employer_rate: Decimal,
    /// Usual employee CIMR rate. Informational: contributions use the rates
    /// of each employee's own membership.
    pub cimr_employee_rate: Decimal,
    /// Usual employer CIMR rate. Informational, like `cimr_employee_rate`.
    pub cimr_employer_rate: Decimal,
    /// Monthly CIMR contribution ceiling, unless the membership sets its own.
    pub cimr_cap: Decimal,
    /// Annual progressive income-tax table, ordered by `min`.
    pub tax_brackets: Vec<TaxBracket>,
    /// Professional-expenses abatement rate applied to annual income.
    #[serde(default = "default_professional_expenses_rate")]
    pub professional_expenses_rate: Decimal,
    /// Annual ceiling of the professional-expenses abatement.
    #[serde(default = "default_professional_expenses_cap")]
    pub professional_expenses_cap: Decimal,
    /// Behaviour switches for open legal questions.
    #[serde(default)]
    pub policy: CalculationPolicy,
}

fn default_professional_expenses_rate() -> Decimal {
    Decimal::new(20, 0)
}

fn default_professional_expenses_cap() -> Decimal {
    Decimal::new(30000, 0)
}

impl LegalParameters {
    /// Returns a copy of these parameters with a different policy.
    pub fn with_policy(mut self, policy: CalculationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks that the tax brackets form a contiguous table covering [0, ∞).
    ///
    /// The calculation functions never call this; it is run by the
    /// configuration loader so a malformed file is rejected up front.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate_brackets(&self) -> Result<(), String> {
        let Some(first) = self.tax_brackets.first() else {
            return Err("tax bracket table is empty".to_string());
        };
        if first.min != Decimal::ZERO {
            return Err(format!("first bracket starts at {} instead of 0", first.min));
        }

        let last_index = self.tax_brackets.len() - 1;
        for (index, bracket) in self.tax_brackets.iter().enumerate() {
            match bracket.max {
                Some(max) if max <= bracket.min => {
                    return Err(format!(
                        "bracket {} has max {} not above min {}",
                        index + 1,
                        max,
                        bracket.min
                    ));
                }
                None if index != last_index => {
                    return Err(format!("open-ended bracket {} is not the last", index + 1));
                }
                Some(_) if index == last_index => {
                    return Err("last bracket must be open-ended".to_string());
                }
                _ => {}
            }

            if let Some(next) = self.tax_brackets.get(index + 1) {
                if bracket.max != Some(next.min) {
                    return Err(format!(
                        "bracket {} ends at {} but bracket {} starts at {}",
                        index + 1,
                        bracket
                            .max
                            .map_or_else(|| "infinity".to_string(), |m| m.to_string()),
                        index + 2,
                        next.min
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Metadata about the jurisdiction a configuration directory describes.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short code (e.g., "MA").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// ISO currency code of all amounts (e.g., "MAD").
    pub currency: String,
    /// URL to the official legal reference.
    pub source_url: String,
}

/// A legal-parameter table together with the date it takes effect.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterTable {
    /// The first day these parameters apply.
    pub effective_date: NaiveDate,
    /// Free-form label (e.g., "Loi de finances 2023").
    #[serde(default)]
    pub label: String,
    /// The parameters themselves.
    pub parameters: LegalParameters,
}

/// The complete configuration of one jurisdiction.
#[derive(Debug, Clone)]
pub struct JurisdictionConfig {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Parameter tables by effective date (sorted oldest first).
    tables: Vec<ParameterTable>,
}

impl JurisdictionConfig {
    /// Creates a new JurisdictionConfig from its component parts.
    pub fn new(metadata: JurisdictionMetadata, tables: Vec<ParameterTable>) -> Self {
        let mut sorted_tables = tables;
        sorted_tables.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            tables: sorted_tables,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns all parameter tables, oldest first.
    pub fn tables(&self) -> &[ParameterTable] {
        &self.tables
    }

    /// Returns the most recent table effective on or before `date`.
    pub fn table_for(&self, date: NaiveDate) -> Option<&ParameterTable> {
        self.tables.iter().rfind(|t| t.effective_date <= date)
    }
}
