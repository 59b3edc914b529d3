//! Error types for the payroll engine.
//!
//! The payroll formulas themselves never fail on arithmetic grounds; the
//! errors here come from loading and selecting legal-parameter tables, from
//! the opt-in strict calculation policy, and from decoding caller input.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use paie_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/jurisdiction.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/jurisdiction.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No legal-parameter table is effective on the requested date.
    #[error("No legal parameters effective on {date}")]
    ParametersNotFound {
        /// The date for which parameters were requested.
        date: NaiveDate,
    },

    /// A legal-parameter table is malformed.
    #[error("Invalid legal parameters effective {effective_date}: {message}")]
    InvalidParameters {
        /// The effective date of the offending table.
        effective_date: NaiveDate,
        /// A description of what is wrong with the table.
        message: String,
    },

    /// The annual taxable income fell into no tax bracket under the strict policy.
    #[error("No tax bracket matches annual taxable income {annual_taxable_income}")]
    NoMatchingBracket {
        /// The annual taxable income, after abatement, that was looked up.
        annual_taxable_income: Decimal,
    },

    /// A compensation record supplied by the caller could not be decoded.
    #[error("Invalid compensation input: {message}")]
    InvalidInput {
        /// A description of the decoding failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
