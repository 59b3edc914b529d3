//! Legal-parameter configuration for the payroll engine.
//!
//! Parameters are versioned by effective date and loaded from YAML files.
//! The calculation functions take a [`LegalParameters`] explicitly; there is
//! no process-wide default table.
//!
//! # Example
//!
//! ```no_run
//! use paie_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/morocco").unwrap();
//! println!("Loaded jurisdiction: {}", loader.jurisdiction().name);
//! ```

mod defaults;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalculationPolicy, JurisdictionConfig, JurisdictionMetadata, LegalParameters, ParameterTable,
    TaxBracket,
};
