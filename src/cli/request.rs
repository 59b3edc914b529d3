//! Input documents for the `paie` command.
//!
//! A document is either one compensation record (a JSON object) or a batch
//! of them (a JSON array).

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeCompensation, MAX_INPUT_AMOUNT};

/// A decoded input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayrollRequest {
    /// A single compensation record.
    Single(Box<EmployeeCompensation>),
    /// Several records, computed in parallel.
    Batch(Vec<EmployeeCompensation>),
}

impl PayrollRequest {
    /// Decodes a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the text is not JSON, is neither an object
    /// nor an array, or does not describe valid compensation records. A
    /// record holding a value larger than [`MAX_INPUT_AMOUNT`] is invalid.
    /// For a batch the message names the offending position.
    ///
    /// # Examples
    ///
    /// ```
    /// use paie_engine::cli::PayrollRequest;
    ///
    /// let request = PayrollRequest::from_json(r#"[{"base_salary": "8000"}]"#)?;
    /// assert_eq!(request.len(), 1);
    /// # Ok::<(), paie_engine::error::EngineError>(())
    /// ```
    pub fn from_json(text: &str) -> EngineResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| EngineError::InvalidInput {
                message: format!("malformed JSON: {}", e),
            })?;

        match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    decode_record(item).map_err(|message| EngineError::InvalidInput {
                        message: format!("record {}: {}", index, message),
                    })
                })
                .collect::<EngineResult<Vec<_>>>()
                .map(PayrollRequest::Batch),
            serde_json::Value::Object(map) => decode_record(serde_json::Value::Object(map))
                .map(|input| PayrollRequest::Single(Box::new(input)))
                .map_err(|message| EngineError::InvalidInput { message }),
            other => Err(EngineError::InvalidInput {
                message: format!(
                    "expected a compensation object or an array of them, found {}",
                    json_kind(&other)
                ),
            }),
        }
    }

    /// Returns the number of compensation records in the document.
    pub fn len(&self) -> usize {
        match self {
            PayrollRequest::Single(_) => 1,
            PayrollRequest::Batch(inputs) => inputs.len(),
        }
    }

    /// Returns true for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn decode_record(value: serde_json::Value) -> Result<EmployeeCompensation, String> {
    let input: EmployeeCompensation = serde_json::from_value(value).map_err(|e| e.to_string())?;
    input.validate_amounts()?;
    Ok(input)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
