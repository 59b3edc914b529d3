//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading dated
//! legal-parameter tables from YAML files.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{JurisdictionConfig, JurisdictionMetadata, LegalParameters, ParameterTable};

/// Loads and provides access to a jurisdiction's legal parameters.
///
/// # Directory Structure
///
/// ```text
/// config/morocco/
/// ├── jurisdiction.yaml      # Jurisdiction metadata
/// └── parameters/
///     └── 2023-01-01.yaml    # Parameters effective from this date
/// ```
///
/// Table files may use the `.yaml` or `.yml` extension; anything else in
/// `parameters/` is skipped. Every table is validated on load: a bracket
/// table with gaps, overlaps or a closed last bracket, or two tables sharing
/// an effective date, is rejected with [`EngineError::InvalidParameters`].
///
/// # Example
///
/// ```no_run
/// use paie_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/morocco")?;
/// let date = NaiveDate::from_ymd_opt(2023, 8, 31).unwrap();
/// let params = loader.parameters_for(date)?;
/// println!("CNSS cap: {}", params.cnss_cap);
/// # Ok::<(), paie_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: JurisdictionConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if `jurisdiction.yaml` or the `parameters`
    ///   directory is missing, or the directory holds no table
    /// - `ConfigParseError` if any file contains invalid YAML or misses a field
    /// - `InvalidParameters` if any tax bracket table is malformed or two
    ///   tables take effect on the same date
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;
        let tables = Self::load_tables(&path.join("parameters"))?;

        for table in &tables {
            table
                .parameters
                .validate_brackets()
                .map_err(|message| EngineError::InvalidParameters {
                    effective_date: table.effective_date,
                    message,
                })?;
        }

        info!(
            jurisdiction = %metadata.code,
            tables = tables.len(),
            "Loaded legal parameter tables"
        );

        Ok(Self {
            config: JurisdictionConfig::new(metadata, tables),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all parameter tables from the parameters directory.
    fn load_tables(tables_dir: &Path) -> EngineResult<Vec<ParameterTable>> {
        let tables_dir_str = tables_dir.display().to_string();

        let entries = fs::read_dir(tables_dir).map_err(|_| EngineError::ConfigNotFound {
            path: tables_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: tables_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml") {
                paths.push(path);
            } else {
                debug!(path = %path.display(), "Skipping non-YAML entry");
            }
        }
        // read_dir order is platform-dependent
        paths.sort();

        let mut by_date: BTreeMap<NaiveDate, (PathBuf, ParameterTable)> = BTreeMap::new();
        for path in paths {
            debug!(path = %path.display(), "Loading parameter table");
            let table = Self::load_yaml::<ParameterTable>(&path)?;

            if let Some((first, _)) = by_date.get(&table.effective_date) {
                return Err(EngineError::InvalidParameters {
                    effective_date: table.effective_date,
                    message: format!(
                        "duplicate effective date ({} and {})",
                        file_name(first),
                        file_name(&path)
                    ),
                });
            }
            by_date.insert(table.effective_date, (path, table));
        }

        if by_date.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no parameter tables found)", tables_dir_str),
            });
        }

        Ok(by_date.into_values().map(|(_, table)| table).collect())
    }

    /// Returns the underlying jurisdiction configuration.
    pub fn config(&self) -> &JurisdictionConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        self.config.jurisdiction()
    }

    /// Returns the legal parameters in force on `date`.
    ///
    /// The most recent table whose effective date is on or before `date` wins.
    ///
    /// # Errors
    ///
    /// Returns `ParametersNotFound` if every table takes effect after `date`.
    pub fn parameters_for(&self, date: NaiveDate) -> EngineResult<&LegalParameters> {
        self.config
            .table_for(date)
            .map(|table| &table.parameters)
            .ok_or(EngineError::ParametersNotFound { date })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
