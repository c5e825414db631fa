//! Payroll run models.
//!
//! A [`PayrollRun`] is the aggregate the engine generates, edits and
//! persists. A [`StoredPayrollRun`] wraps it with the identity and version
//! assigned by the run store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineResult;

use super::{BranchFilter, PayPeriod, PayslipLine, checked_money_sum, round_money};

/// Lifecycle state of a payroll run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    /// Saved for later review; may still be edited.
    #[default]
    #[serde(alias = "draft")]
    Draft,
    /// Posted payroll. Reporting treats it as final.
    #[serde(alias = "finalized")]
    Finalized,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Draft => write!(f, "Draft"),
            RunStatus::Finalized => write!(f, "Finalized"),
        }
    }
}

/// A payroll run: one payslip line per covered employee.
///
/// Line order is the employee enumeration order at generation time and is
/// preserved across edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// The period this run pays.
    pub period: PayPeriod,
    /// The branch filter the run was generated with.
    pub branch_filter: BranchFilter,
    /// Lifecycle state.
    pub status: RunStatus,
    /// Payslip lines in generation order.
    pub lines: Vec<PayslipLine>,
}

impl PayrollRun {
    /// Sum of every line's net pay.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAmount`](crate::error::EngineError::InvalidAmount)
    /// if the sum does not fit in a decimal.
    pub fn total_payout(&self) -> EngineResult<Decimal> {
        checked_money_sum("total_payout", self.lines.iter().map(|line| line.net_pay))
            .map(round_money)
    }

    /// Looks up the line for an employee.
    pub fn line_mut(&mut self, employee_id: &str) -> Option<&mut PayslipLine> {
        self.lines
            .iter_mut()
            .find(|line| line.employee_id == employee_id)
    }
}

/// A persisted payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPayrollRun {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Incremented on every update; starts at 1.
    pub version: u64,
    /// The run as last saved.
    pub run: PayrollRun,
    /// When the run was first saved.
    pub created_at: DateTime<Utc>,
    /// When the run was last written.
    pub updated_at: DateTime<Utc>,
}
