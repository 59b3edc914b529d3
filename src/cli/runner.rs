//! Command execution for `paie`.

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::calculation::{compute_payroll, compute_payroll_batch};
use crate::config::{ConfigLoader, LegalParameters};
use crate::error::{EngineError, EngineResult};

use super::Cli;
use super::request::PayrollRequest;
use super::response::{BatchEntry, CliError, PayrollOutput};

/// Loads the configuration, reads the input document and computes it.
///
/// # Errors
///
/// Fails when the configuration cannot be loaded, no parameter table is
/// effective on the pay date, the input cannot be read or decoded, or a
/// single-record computation fails. Failures inside a batch are reported
/// per position in the output instead.
pub fn run(cli: &Cli) -> EngineResult<PayrollOutput> {
    let loader = ConfigLoader::load(&cli.config)?;
    let date = cli.date.unwrap_or_else(today);
    let params = loader.parameters_for(date)?;
    info!(
        jurisdiction = %loader.jurisdiction().code,
        pay_date = %date,
        "Using legal parameters"
    );

    let text = read_input(cli.input.as_deref())?;
    run_document(&text, params)
}

/// Decodes a JSON document and computes every record in it.
///
/// # Examples
///
/// ```
/// use paie_engine::cli::{PayrollOutput, run_document};
/// use paie_engine::config::LegalParameters;
///
/// let params = LegalParameters::morocco_2023();
/// let output = run_document(r#"{"base_salary": "10000"}"#, &params)?;
/// assert!(matches!(output, PayrollOutput::Single(_)));
/// # Ok::<(), paie_engine::error::EngineError>(())
/// ```
pub fn run_document(text: &str, params: &LegalParameters) -> EngineResult<PayrollOutput> {
    let request = PayrollRequest::from_json(text)?;
    let start_time = Instant::now();

    let output = match request {
        PayrollRequest::Single(input) => {
            let result = compute_payroll(&input, params)?;
            PayrollOutput::Single(Box::new(result))
        }
        PayrollRequest::Batch(inputs) => {
            let entries = compute_payroll_batch(&inputs, params)
                .into_iter()
                .zip(&inputs)
                .map(|(result, input)| match result {
                    Ok(result) => BatchEntry::Computed(Box::new(result)),
                    Err(err) => {
                        warn!(
                            employee_id = input.employee_id.as_deref().unwrap_or("-"),
                            error = %err,
                            "Calculation failed"
                        );
                        let error = CliError::from(&err).for_employee(input.employee_id.clone());
                        BatchEntry::Failed { error }
                    }
                })
                .collect();
            PayrollOutput::Batch(entries)
        }
    };

    info!(
        failures = output.failures(),
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed"
    );
    Ok(output)
}

fn read_input(path: Option<&Path>) -> EngineResult<String> {
    let mut text = String::new();
    let outcome = match path {
        Some(path) => {
            std::fs::File::open(path).and_then(|mut file| file.read_to_string(&mut text))
        }
        None => std::io::stdin().read_to_string(&mut text),
    };
    outcome.map_err(|e| EngineError::InvalidInput {
        message: format!(
            "cannot read {}: {}",
            path.map_or_else(|| "standard input".to_string(), |p| p.display().to_string()),
            e
        ),
    })?;
    Ok(text)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
