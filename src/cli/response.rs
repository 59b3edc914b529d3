//! Output documents for the `paie` command.
//!
//! Results are printed as JSON. In batch mode each position holds either the
//! payroll result or an error object, so one failure never hides the rest.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::PayrollResult;

/// Error object printed in place of a failed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Identifier of the employee whose computation failed, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl CliError {
    /// Creates a new error object.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            employee_id: None,
        }
    }

    /// Attaches the employee identifier.
    pub fn for_employee(mut self, employee_id: Option<String>) -> Self {
        self.employee_id = employee_id;
        self
    }
}

impl From<&EngineError> for CliError {
    fn from(error: &EngineError) -> Self {
        let code = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                "CONFIG_ERROR"
            }
            EngineError::ParametersNotFound { .. } => "PARAMETERS_NOT_FOUND",
            EngineError::InvalidParameters { .. } => "INVALID_PARAMETERS",
            EngineError::NoMatchingBracket { .. } => "NO_MATCHING_BRACKET",
            EngineError::InvalidInput { .. } => "INVALID_INPUT",
        };
        CliError::new(code, error.to_string())
    }
}

/// One position of a batch output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    /// The computed payroll.
    Computed(Box<PayrollResult>),
    /// The error that prevented the computation.
    Failed {
        /// The error object.
        error: CliError,
    },
}

/// What the command prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PayrollOutput {
    /// Result of a single-record document.
    Single(Box<PayrollResult>),
    /// Results of a batch document, in input order.
    Batch(Vec<BatchEntry>),
}

impl PayrollOutput {
    /// Returns the number of failed computations.
    pub fn failures(&self) -> usize {
        match self {
            PayrollOutput::Single(_) => 0,
            PayrollOutput::Batch(entries) => entries
                .iter()
                .filter(|entry| matches!(entry, BatchEntry::Failed { .. }))
                .count(),
        }
    }

    /// Serializes the output to JSON.
    pub fn render(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
