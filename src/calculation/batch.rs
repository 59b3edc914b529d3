//! Parallel payroll runs.
//!
//! Uses [`rayon`] to spread independent per-employee computations across
//! CPU cores. Results come back in input order.

use rayon::prelude::*;
use tracing::info;

use crate::config::LegalParameters;
use crate::error::EngineResult;
use crate::models::{EmployeeCompensation, PayrollResult};

use super::payroll::compute_payroll;

/// Computes the payroll of every input against the same legal parameters.
///
/// Each entry of the returned vector is the result for the input at the same
/// position. A failure for one employee does not affect the others.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::compute_payroll_batch;
/// use paie_engine::config::LegalParameters;
/// use paie_engine::models::EmployeeCompensation;
/// use rust_decimal::Decimal;
///
/// let params = LegalParameters::morocco_2023();
/// let inputs: Vec<_> = [5000, 10000, 20000]
///     .into_iter()
///     .map(|salary| EmployeeCompensation::with_base_salary(Decimal::from(salary)))
///     .collect();
///
/// let results = compute_payroll_batch(&inputs, &params);
/// assert_eq!(results.len(), 3);
/// assert_eq!(results[1].as_ref().unwrap().gross_pay, Decimal::from(10000));
/// ```
pub fn compute_payroll_batch(
    inputs: &[EmployeeCompensation],
    params: &LegalParameters,
) -> Vec<EngineResult<PayrollResult>> {
    let results: Vec<EngineResult<PayrollResult>> = inputs
        .par_iter()
        .map(|input| compute_payroll(input, params))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(employees = inputs.len(), failed, "Payroll batch completed");
    results
}
