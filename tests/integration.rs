//! Integration tests for the payroll engine.
//!
//! This test suite covers:
//! - Gross pay composition, overtime and absences
//! - Employee social contributions and their caps
//! - Progressive income tax, including bracket boundaries
//! - CIMR optionality in results and JSON output
//! - Net pay and employer cost
//! - Calculation policies
//! - Configuration loading and the command-line document runner
//! - Property tests (determinism, additivity, caps, independence)

use std::str::FromStr;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::Value;

use paie_engine::calculation::{
    BELOW_MINIMUM_WAGE, NEGATIVE_GROSS_PAY, NEGATIVE_NET_PAY, annual_tax, find_bracket,
};
use paie_engine::cli::{BatchEntry, PayrollOutput, run_document};
use paie_engine::config::{CalculationPolicy, ConfigLoader, LegalParameters};
use paie_engine::models::{
    Absence, AbsenceKind, BenefitInKind, Bonus, BonusKind, ComplementaryRetirement, Deduction,
    EmployeeCompensation, OvertimeEntry, OvertimeKind, PayrollResult,
};
use paie_engine::{compute_payroll, compute_payroll_batch};

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn load_parameters() -> LegalParameters {
    let loader = ConfigLoader::load("./config/morocco").expect("Failed to load config");
    let date = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
    loader
        .parameters_for(date)
        .expect("No parameters for 2023")
        .clone()
}

fn compute(input: &EmployeeCompensation) -> PayrollResult {
    compute_payroll(input, &load_parameters()).expect("Calculation failed")
}

fn salary(amount: &str) -> EmployeeCompensation {
    EmployeeCompensation::with_base_salary(decimal(amount))
}

fn fixed_bonus(name: &str, amount: &str) -> Bonus {
    Bonus {
        name: name.to_string(),
        amount: decimal(amount),
        kind: BonusKind::Fixed,
        taxable: true,
    }
}

fn cimr_member(active: bool) -> ComplementaryRetirement {
    ComplementaryRetirement {
        active,
        employee_rate: decimal("3"),
        employer_rate: decimal("3.9"),
        cap: None,
    }
}

/// The payslip used throughout: 10000 base, 800 fixed bonus, 5% seniority
/// bonus and 1500 of housing.
fn composed_input() -> EmployeeCompensation {
    let mut input = salary("10000");
    input.employee_id = Some("EMP-001".to_string());
    input.bonuses = vec![
        fixed_bonus("Rendement", "800"),
        Bonus {
            name: "Ancienneté".to_string(),
            amount: decimal("5"),
            kind: BonusKind::PercentageOfBase,
            taxable: true,
        },
    ];
    input.benefits_in_kind = vec![BenefitInKind {
        name: "Logement".to_string(),
        value: decimal("1500"),
        taxable: true,
    }];
    input
}

// =============================================================================
// SECTION 1: Gross Pay
// =============================================================================

#[test]
fn test_gross_pay_composition() {
    let result = compute(&composed_input());

    assert_eq!(result.gross_pay, decimal("12800"));
    assert_eq!(result.gross_breakdown.bonuses[1].amount, decimal("500"));
    assert_eq!(result.gross_breakdown.benefits[0].value, decimal("1500"));
    assert!(result.audit_trace.warnings.is_empty());
}

#[test]
fn test_overtime_uses_191_monthly_hours() {
    let mut input = salary("10000");
    input.overtime_entries.push(OvertimeEntry {
        kind: OvertimeKind::Day,
        hours: decimal("10"),
        surcharge_rate_percent: decimal("25"),
    });

    let result = compute(&input);
    assert_eq!(result.gross_breakdown.overtime_amount, decimal("654.45"));
    assert_eq!(result.gross_pay, decimal("10654.45"));
}

#[test]
fn test_justified_absences_are_not_deducted() {
    let mut input = salary("2600");
    input.absences = vec![
        Absence {
            kind: AbsenceKind::Justified,
            days: decimal("5"),
        },
        Absence {
            kind: AbsenceKind::Unjustified,
            days: decimal("2"),
        },
    ];

    let result = compute(&input);
    assert_eq!(result.deduction_breakdown.absence_deduction, decimal("200"));
    assert_eq!(result.gross_pay, decimal("2400"));
}

#[test]
fn test_sickness_and_unpaid_leave_are_deducted() {
    let mut input = salary("2600");
    input.absences = vec![
        Absence {
            kind: AbsenceKind::Sickness,
            days: decimal("1"),
        },
        Absence {
            kind: AbsenceKind::UnpaidLeave,
            days: decimal("1"),
        },
    ];

    let result = compute(&input);
    assert_eq!(result.deduction_breakdown.absence_deduction, decimal("200"));
}

#[test]
fn test_excessive_absences_give_negative_gross() {
    let mut input = salary("2600");
    input.absences.push(Absence {
        kind: AbsenceKind::Unjustified,
        days: decimal("27"),
    });

    let result = compute(&input);
    assert_eq!(result.gross_pay, decimal("-100"));
    assert!(result.audit_trace.has_warning(NEGATIVE_GROSS_PAY));
}

// =============================================================================
// SECTION 2: Social Contributions
// =============================================================================

#[test]
fn test_cnss_is_capped() {
    let result = compute(&salary("25000"));
    assert_eq!(result.contributions.cnss, decimal("268.80"));
}

#[test]
fn test_amo_is_uncapped() {
    let result = compute(&salary("25000"));
    assert_eq!(result.contributions.amo, decimal("565.00"));
}

#[test]
fn test_cimr_for_active_member() {
    let mut input = salary("9000");
    input.complementary_retirement = Some(cimr_member(true));

    let result = compute(&input);
    assert_eq!(result.contributions.cimr, Some(decimal("180.00")));
    assert_eq!(result.employer_cost.cimr, Some(decimal("234.00")));
    assert_eq!(
        result.deduction_breakdown.social_contributions,
        decimal("268.80") + decimal("203.40") + decimal("180.00")
    );
}

#[test]
fn test_cimr_absent_without_membership() {
    let result = compute(&salary("9000"));
    assert_eq!(result.contributions.cimr, None);
    assert_eq!(result.employer_cost.cimr, None);
}

#[test]
fn test_cimr_absent_for_inactive_member() {
    let mut input = salary("9000");
    input.complementary_retirement = Some(cimr_member(false));

    let result = compute(&input);
    assert_eq!(result.contributions.cimr, None);
    assert_eq!(result.employer_cost.cimr, None);
}

#[test]
fn test_absent_cimr_is_omitted_from_json() {
    let json: Value = serde_json::to_value(compute(&salary("9000"))).unwrap();

    assert!(json["contributions"].get("cimr").is_none());
    assert!(json["employer_cost"].get("cimr").is_none());
    assert_eq!(json["contributions"]["cnss"], "268.80");
}

// =============================================================================
// SECTION 3: Income Tax
// =============================================================================

#[test]
fn test_low_income_falls_in_zero_bracket() {
    // 2797.80 net taxable, 26858.88 a year after abatement
    let result = compute(&salary("3000"));
    assert_eq!(result.net_taxable_income, decimal("2797.80"));
    assert_eq!(result.contributions.income_tax, Decimal::ZERO);
    assert_eq!(result.net_pay, decimal("2797.80"));
}

#[test]
fn test_bracket_boundary_50000() {
    let params = load_parameters();

    let at = find_bracket(decimal("50000"), &params.tax_brackets).unwrap();
    assert_eq!(at.rate, decimal("10"));
    assert_eq!(at.amount_to_subtract, decimal("3000"));
    assert_eq!(annual_tax(decimal("50000"), at), decimal("2000"));

    let above = find_bracket(decimal("50001"), &params.tax_brackets).unwrap();
    assert_eq!(above.rate, decimal("20"));
    assert_eq!(above.amount_to_subtract, decimal("8000"));
    assert_eq!(annual_tax(decimal("50001"), above), decimal("2000.2"));
}

#[test]
fn test_every_bracket_lower_boundary() {
    let params = load_parameters();
    let cases = [
        ("30000", "0", "0"),
        ("30001", "10", "0.1"),
        ("50000", "10", "2000"),
        ("50001", "20", "2000.2"),
        ("60000", "20", "4000"),
        ("60001", "30", "4000.3"),
        ("80000", "30", "10000"),
        ("80001", "34", "10000.34"),
        ("180000", "34", "44000"),
        ("180001", "38", "44000.38"),
    ];

    for (income, rate, tax) in cases {
        let bracket = find_bracket(decimal(income), &params.tax_brackets).unwrap();
        assert_eq!(bracket.rate, decimal(rate), "income {}", income);
        assert_eq!(annual_tax(decimal(income), bracket), decimal(tax), "income {}", income);
    }
}

#[test]
fn test_income_tax_on_composed_payslip() {
    // 12241.92 net taxable, 117522.432 a year after abatement, 34% bracket
    let result = compute(&composed_input());
    assert_eq!(result.net_taxable_income, decimal("12241.92"));
    assert_eq!(result.contributions.income_tax, decimal("1896"));
    assert_eq!(result.net_pay, decimal("10345.92"));
}

#[test]
fn test_monthly_tax_is_a_whole_amount() {
    for amount in ["4500", "7321.45", "15999.99", "42000"] {
        let result = compute(&salary(amount));
        assert_eq!(
            result.contributions.income_tax,
            result.contributions.income_tax.trunc(),
            "salary {}",
            amount
        );
    }
}

// =============================================================================
// SECTION 4: Net Pay and Employer Cost
// =============================================================================

#[test]
fn test_net_pay_without_deductions_only_removes_tax() {
    let result = compute(&composed_input());
    assert_eq!(
        result.net_pay,
        result.net_taxable_income - result.contributions.income_tax
    );
}

#[test]
fn test_net_pay_subtracts_every_deduction() {
    let mut input = composed_input();
    input.deductions = vec![
        Deduction {
            name: "Prêt".to_string(),
            amount: decimal("1000"),
        },
        Deduction {
            name: "Avance".to_string(),
            amount: decimal("345.92"),
        },
    ];

    let result = compute(&input);
    assert_eq!(result.deduction_breakdown.other_deductions, decimal("1345.92"));
    assert_eq!(result.net_pay, decimal("9000.00"));
}

#[test]
fn test_negative_net_pay_is_kept_by_default() {
    let mut input = salary("4000");
    input.deductions.push(Deduction {
        name: "Saisie".to_string(),
        amount: decimal("5000"),
    });

    let result = compute(&input);
    assert!(result.net_pay < Decimal::ZERO);
    assert!(result.audit_trace.has_warning(NEGATIVE_NET_PAY));
}

#[test]
fn test_employer_cost_on_composed_payslip() {
    let result = compute(&composed_input());
    assert_eq!(result.employer_cost.cnss, decimal("538.80"));
    assert_eq!(result.employer_cost.amo, decimal("526.08"));
    assert_eq!(result.employer_cost.total, decimal("1064.88"));
}

#[test]
fn test_employer_rates_do_not_change_employee_side() {
    let input = composed_input();
    let params = load_parameters();
    let mut changed = params.clone();
    changed.cnss_employer_rate = decimal("12");
    changed.amo_employer_rate = decimal("6");

    let before = compute_payroll(&input, &params).unwrap();
    let after = compute_payroll(&input, &changed).unwrap();

    assert_eq!(before.contributions, after.contributions);
    assert_eq!(before.net_pay, after.net_pay);
    assert_ne!(before.employer_cost, after.employer_cost);
}

#[test]
fn test_below_minimum_wage_is_flagged_not_enforced() {
    let result = compute(&salary("2600"));
    assert!(result.audit_trace.has_warning(BELOW_MINIMUM_WAGE));
    assert_eq!(result.gross_pay, decimal("2600"));
}

// =============================================================================
// SECTION 5: Calculation Policies
// =============================================================================

#[test]
fn test_floor_net_pay_policy() {
    let params = load_parameters().with_policy(CalculationPolicy {
        floor_net_pay_at_zero: true,
        ..CalculationPolicy::default()
    });
    let mut input = salary("4000");
    input.deductions.push(Deduction {
        name: "Saisie".to_string(),
        amount: decimal("5000"),
    });

    let result = compute_payroll(&input, &params).unwrap();
    assert_eq!(result.net_pay, Decimal::ZERO);
    assert!(result.audit_trace.has_warning(NEGATIVE_NET_PAY));
}

#[test]
fn test_exempt_items_policy_keeps_gross_and_pays_items() {
    let params = load_parameters().with_policy(CalculationPolicy {
        exempt_non_taxable_items: true,
        ..CalculationPolicy::default()
    });
    let mut input = salary("10000");
    input.bonuses.push(Bonus {
        taxable: false,
        ..fixed_bonus("Panier", "1000")
    });

    let result = compute_payroll(&input, &params).unwrap();
    assert_eq!(result.gross_pay, decimal("11000"));
    // gross less 268.80 CNSS, 248.60 AMO and the 1000 exempt bonus
    assert_eq!(result.net_taxable_income, decimal("9482.60"));
    assert_eq!(
        result.net_pay,
        result.net_taxable_income + decimal("1000") - result.contributions.income_tax
    );
}

// =============================================================================
// SECTION 6: Configuration, Batch and Command Line
// =============================================================================

#[test]
fn test_bundled_configuration_matches_2023_baseline() {
    assert_eq!(load_parameters(), LegalParameters::morocco_2023());
}

#[test]
fn test_batch_matches_individual_results() {
    let params = load_parameters();
    let inputs: Vec<EmployeeCompensation> = ["3000", "6000", "12000", "40000"]
        .into_iter()
        .map(salary)
        .collect();

    let results = compute_payroll_batch(&inputs, &params);
    for (input, result) in inputs.iter().zip(results) {
        assert_eq!(result.unwrap(), compute_payroll(input, &params).unwrap());
    }
}

#[test]
fn test_batch_document_from_fixture() {
    let text = std::fs::read_to_string("./tests/fixtures/inputs/batch.json").unwrap();

    let output = run_document(&text, &load_parameters()).unwrap();
    assert_eq!(output.failures(), 0);
    let PayrollOutput::Batch(entries) = output else {
        panic!("expected a batch output");
    };
    let ids: Vec<Option<String>> = entries
        .iter()
        .map(|entry| match entry {
            BatchEntry::Computed(result) => result.employee_id.clone(),
            BatchEntry::Failed { error } => error.employee_id.clone(),
        })
        .collect();
    assert_eq!(
        ids,
        vec![
            Some("EMP-001".to_string()),
            Some("EMP-002".to_string()),
            Some("EMP-003".to_string())
        ]
    );
}

#[test]
fn test_rendered_output_is_valid_json() {
    let text = std::fs::read_to_string("./tests/fixtures/inputs/single.json").unwrap();

    let output = run_document(&text, &load_parameters()).unwrap();
    let json: Value = serde_json::from_str(&output.render(true).unwrap()).unwrap();
    assert_eq!(json["employee_id"], "EMP-001");
    assert_eq!(json["gross_pay"], "12800.00");
    assert_eq!(json["audit_trace"]["steps"].as_array().unwrap().len(), 8);
}

// =============================================================================
// SECTION 7: Property Tests
// =============================================================================

fn money(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0..max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

fn deductions() -> impl Strategy<Value = Vec<Deduction>> {
    prop::collection::vec(money(200_000), 0..5).prop_map(|amounts| {
        amounts
            .into_iter()
            .enumerate()
            .map(|(i, amount)| Deduction {
                name: format!("deduction-{}", i),
                amount,
            })
            .collect()
    })
}

fn compensation() -> impl Strategy<Value = EmployeeCompensation> {
    (
        money(10_000_000),
        money(300_000),
        any::<bool>(),
        0u32..20,
        deductions(),
    )
        .prop_map(|(base, bonus, cimr, overtime_hours, deductions)| {
            let mut input = EmployeeCompensation::with_base_salary(base);
            input.bonuses.push(Bonus {
                amount: bonus,
                ..fixed_bonus("Prime", "0")
            });
            input.overtime_entries.push(OvertimeEntry {
                kind: OvertimeKind::Day,
                hours: Decimal::from(overtime_hours),
                surcharge_rate_percent: Decimal::from(25),
            });
            input.deductions = deductions;
            if cimr {
                input.complementary_retirement = Some(cimr_member(true));
            }
            input
        })
}

proptest! {
    #[test]
    fn prop_computation_is_deterministic(input in compensation()) {
        let params = LegalParameters::morocco_2023();
        let first = compute_payroll(&input, &params).unwrap();
        let second = compute_payroll(&input, &params).unwrap();

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_net_pay_is_additive(input in compensation()) {
        let result = compute_payroll(&input, &LegalParameters::morocco_2023()).unwrap();
        let deductions: Decimal = input.deductions.iter().map(|d| d.amount).sum();

        prop_assert_eq!(
            result.net_pay,
            result.net_taxable_income - result.contributions.income_tax - deductions
        );
    }

    #[test]
    fn prop_cnss_never_exceeds_capped_amount(input in compensation()) {
        let result = compute_payroll(&input, &LegalParameters::morocco_2023()).unwrap();

        prop_assert!(result.contributions.cnss <= decimal("268.80"));
        prop_assert!(result.employer_cost.cnss <= decimal("538.80"));
    }

    #[test]
    fn prop_income_tax_is_whole_and_non_negative(input in compensation()) {
        let result = compute_payroll(&input, &LegalParameters::morocco_2023()).unwrap();
        let tax = result.contributions.income_tax;

        prop_assert!(tax >= Decimal::ZERO);
        prop_assert_eq!(tax, tax.trunc());
    }

    #[test]
    fn prop_employee_rates_do_not_affect_employer_cost(
        input in compensation(),
        cnss_rate in money(1_000),
        amo_rate in money(1_000),
    ) {
        let params = LegalParameters::morocco_2023();
        let mut changed = params.clone();
        changed.cnss_employee_rate = cnss_rate;
        changed.amo_employee_rate = amo_rate;

        let before = compute_payroll(&input, &params).unwrap();
        let after = compute_payroll(&input, &changed).unwrap();
        prop_assert_eq!(before.employer_cost, after.employer_cost);
    }
}
