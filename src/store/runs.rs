//! In-memory payroll run store.

use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollRun, StoredPayrollRun};

use super::RunStore;

/// A [`RunStore`] that keeps runs in process memory, in creation order.
#[derive(Debug, Default)]
pub struct InMemoryRunStore {
    runs: RwLock<Vec<StoredPayrollRun>>,
}

impl InMemoryRunStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunStore for InMemoryRunStore {
    fn insert(&self, run: PayrollRun) -> EngineResult<StoredPayrollRun> {
        let now = Utc::now();
        let stored = StoredPayrollRun {
            id: Uuid::new_v4(),
            version: 1,
            run,
            created_at: now,
            updated_at: now,
        };
        let mut runs = self.runs.write().map_err(|_| poisoned())?;
        runs.push(stored.clone());
        Ok(stored)
    }

    fn get(&self, id: Uuid) -> EngineResult<StoredPayrollRun> {
        let runs = self.runs.read().map_err(|_| poisoned())?;
        runs.iter()
            .find(|stored| stored.id == id)
            .cloned()
            .ok_or(EngineError::RunNotFound { id })
    }

    fn list(&self) -> EngineResult<Vec<StoredPayrollRun>> {
        let runs = self.runs.read().map_err(|_| poisoned())?;
        Ok(runs.clone())
    }

    fn replace(
        &self,
        id: Uuid,
        expected_version: u64,
        run: PayrollRun,
    ) -> EngineResult<StoredPayrollRun> {
        let mut runs = self.runs.write().map_err(|_| poisoned())?;
        let stored = runs
            .iter_mut()
            .find(|stored| stored.id == id)
            .ok_or(EngineError::RunNotFound { id })?;

        if stored.version != expected_version {
            return Err(EngineError::VersionConflict {
                id,
                expected: expected_version,
                actual: stored.version,
            });
        }

        stored.run = run;
        stored.version += 1;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

fn poisoned() -> EngineError {
    EngineError::Storage {
        message: "run store lock poisoned".to_string(),
    }
}
