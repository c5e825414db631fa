//! Save and update operations for payroll runs.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{PayPeriod, PayrollRun, PayslipLine, RunStatus, StoredPayrollRun};

use super::RunStore;

/// Persists payroll runs on top of a [`RunStore`].
///
/// Lines are stored verbatim: callers recompute edited lines before saving.
/// Lines whose figures disagree with a recomputation are logged, not fixed.
#[derive(Clone)]
pub struct PayrollService {
    runs: Arc<dyn RunStore>,
}

impl PayrollService {
    /// Creates a service over the given store.
    pub fn new(runs: Arc<dyn RunStore>) -> Self {
        Self { runs }
    }

    /// Persists a new run with the status it carries.
    ///
    /// A run whose net pay cannot be totalled is rejected with
    /// [`InvalidAmount`](crate::error::EngineError::InvalidAmount) and not stored.
    pub fn save(&self, run: PayrollRun) -> EngineResult<StoredPayrollRun> {
        let total_payout = run.total_payout()?;
        warn_inconsistent_lines(&run.lines);
        let stored = self.runs.insert(run)?;

        info!(
            run_id = %stored.id,
            status = %stored.run.status,
            lines = stored.run.lines.len(),
            total_payout = %total_payout,
            "Payroll run saved"
        );
        Ok(stored)
    }

    /// Overwrites the period, lines and status of an existing run.
    ///
    /// Any status transition is allowed, including Finalized back to Draft.
    /// The branch filter recorded at creation is kept.
    ///
    /// # Errors
    ///
    /// - [`RunNotFound`](crate::error::EngineError::RunNotFound) if the run does not exist.
    /// - [`VersionConflict`](crate::error::EngineError::VersionConflict) if the run was
    ///   updated since `expected_version` was read.
    /// - [`InvalidAmount`](crate::error::EngineError::InvalidAmount) if the new lines'
    ///   net pay cannot be totalled.
    pub fn update(
        &self,
        id: Uuid,
        expected_version: u64,
        period: PayPeriod,
        lines: Vec<PayslipLine>,
        status: RunStatus,
    ) -> EngineResult<StoredPayrollRun> {
        let current = self.runs.get(id)?;
        if current.run.status == RunStatus::Finalized && status == RunStatus::Draft {
            warn!(run_id = %id, "Finalized payroll run reopened as Draft");
        }
        warn_inconsistent_lines(&lines);

        let run = PayrollRun {
            period,
            branch_filter: current.run.branch_filter,
            status,
            lines,
        };
        let total_payout = run.total_payout()?;
        let stored = self.runs.replace(id, expected_version, run)?;

        info!(
            run_id = %stored.id,
            version = stored.version,
            status = %stored.run.status,
            lines = stored.run.lines.len(),
            total_payout = %total_payout,
            "Payroll run updated"
        );
        Ok(stored)
    }

    /// Fetches a persisted run.
    pub fn get(&self, id: Uuid) -> EngineResult<StoredPayrollRun> {
        self.runs.get(id)
    }

    /// Lists persisted runs in creation order.
    pub fn list(&self) -> EngineResult<Vec<StoredPayrollRun>> {
        self.runs.list()
    }
}

fn warn_inconsistent_lines(lines: &[PayslipLine]) {
    for line in lines.iter().filter(|line| !line.is_consistent()) {
        warn!(
            employee_id = %line.employee_id,
            net_pay = %line.net_pay,
            "Saving payslip line whose figures do not match recomputation"
        );
    }
}
