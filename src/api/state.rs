//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::RunDefaults;
use crate::config::ConfigLoader;
use crate::store::{CompensationSource, InMemoryRunStore, PayrollService, RunStore};

/// Shared application state.
///
/// Holds the loaded configuration, the compensation profile reader and
/// the payroll run service.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    directory: Arc<dyn CompensationSource>,
    payroll: PayrollService,
}

impl AppState {
    /// Creates state backed by an in-memory directory seeded from the
    /// configuration roster and an empty in-memory run store.
    pub fn new(config: ConfigLoader) -> Self {
        let directory = Arc::new(config.directory());
        Self::with_stores(config, directory, Arc::new(InMemoryRunStore::new()))
    }

    /// Creates state over caller-supplied stores.
    pub fn with_stores(
        config: ConfigLoader,
        directory: Arc<dyn CompensationSource>,
        runs: Arc<dyn RunStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            directory,
            payroll: PayrollService::new(runs),
        }
    }

    /// Returns the compensation profile reader.
    pub fn directory(&self) -> &dyn CompensationSource {
        self.directory.as_ref()
    }

    /// Returns the payroll run service.
    pub fn payroll(&self) -> &PayrollService {
        &self.payroll
    }

    /// Returns the configured generation defaults.
    pub fn run_defaults(&self) -> RunDefaults {
        self.config.engine().run_defaults()
    }
}
