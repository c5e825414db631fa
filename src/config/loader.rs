//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::store::{InMemoryDirectory, RosterEntry};

use super::types::{EngineSettings, PayrollConfig, RosterConfig, ServerSettings};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── payroll.yaml    # Engine defaults and server settings
/// └── employees.yaml  # Employee roster with compensation profiles
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Default days present: {}", loader.engine().default_days_present);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
    roster: Vec<RosterEntry>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if either file is missing.
    /// - [`EngineError::ConfigParseError`] if either file is not valid YAML
    ///   for its structure.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let config = Self::load_yaml::<PayrollConfig>(&path.join("payroll.yaml"))?;
        let roster = Self::load_yaml::<RosterConfig>(&path.join("employees.yaml"))?;

        Ok(Self {
            config,
            roster: roster.employees,
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

    /// Returns the run generation settings.
    pub fn engine(&self) -> &EngineSettings {
        &self.config.engine
    }

    /// Returns the HTTP server settings.
    pub fn server(&self) -> &ServerSettings {
        &self.config.server
    }

    /// Returns the employee roster.
    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    /// Builds an in-memory employee directory seeded from the roster.
    pub fn directory(&self) -> InMemoryDirectory {
        InMemoryDirectory::from_roster(self.roster.clone())
    }
}
