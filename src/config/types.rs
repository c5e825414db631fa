//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{DEFAULT_DAYS_PRESENT, RunDefaults};
use crate::store::RosterEntry;

/// Defaults applied when generating a run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Initial days present on every generated line.
    pub default_days_present: Decimal,
    /// Initial double pay amount on every generated line.
    pub default_double_pay_amount: Decimal,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_days_present: Decimal::from(DEFAULT_DAYS_PRESENT),
            default_double_pay_amount: Decimal::ZERO,
        }
    }
}

impl EngineSettings {
    /// Converts the settings into generation defaults.
    pub fn run_defaults(&self) -> RunDefaults {
        RunDefaults {
            days_present: self.default_days_present,
            double_pay_amount: self.default_double_pay_amount,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the server binds to, e.g. "0.0.0.0:8080".
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Structure of `payroll.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayrollConfig {
    /// Run generation defaults.
    #[serde(default)]
    pub engine: EngineSettings,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
}

/// Structure of `employees.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterConfig {
    /// Employees with their compensation profiles, in enumeration order.
    #[serde(default)]
    pub employees: Vec<RosterEntry>,
}
