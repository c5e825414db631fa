//! Storage boundaries for the payroll engine.
//!
//! The engine reads compensation profiles through [`CompensationSource`]
//! and persists runs through [`RunStore`]. Both are blocking calls with no
//! retry at this layer. In-memory implementations back the HTTP service
//! and the tests.

mod directory;
mod runs;
mod service;

pub use directory::{InMemoryDirectory, RosterEntry};
pub use runs::InMemoryRunStore;
pub use service::PayrollService;

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{CompensationProfile, Employee, PayrollRun, StoredPayrollRun};

/// Read access to employees and their compensation profiles.
pub trait CompensationSource: Send + Sync {
    /// Lists every employee in enumeration order.
    fn employees(&self) -> EngineResult<Vec<Employee>>;

    /// Returns the employee's current compensation profile, if one exists.
    fn profile(&self, employee_id: &str) -> EngineResult<Option<CompensationProfile>>;
}

/// Durable storage for payroll runs.
pub trait RunStore: Send + Sync {
    /// Persists a new run at version 1.
    fn insert(&self, run: PayrollRun) -> EngineResult<StoredPayrollRun>;

    /// Fetches a run by id.
    fn get(&self, id: Uuid) -> EngineResult<StoredPayrollRun>;

    /// Lists every run in creation order.
    fn list(&self) -> EngineResult<Vec<StoredPayrollRun>>;

    /// Overwrites a run if its stored version equals `expected_version`,
    /// bumping the version by one.
    fn replace(
        &self,
        id: Uuid,
        expected_version: u64,
        run: PayrollRun,
    ) -> EngineResult<StoredPayrollRun>;
}
