//! Live recalculation of edited payslip lines.
//!
//! Edits to attendance figures re-run the gross and net steps against the
//! line's stored [`ProfileSnapshot`](crate::models::ProfileSnapshot). The
//! live compensation profile is never consulted, so a profile change made
//! after generation does not alter the run's deduction basis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollRun;

/// The attendance-derived fields a user may edit on a generated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditableField {
    /// Days present in the period.
    DaysPresent,
    /// Manually entered holiday or double pay.
    DoublePayAmount,
}

impl std::fmt::Display for EditableField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditableField::DaysPresent => write!(f, "days_present"),
            EditableField::DoublePayAmount => write!(f, "double_pay_amount"),
        }
    }
}

/// Applies an edit to one employee's line and returns the updated run.
///
/// Only the edited line's `gross_pay`, `total_deductions` and `net_pay`
/// change; other lines are carried over as-is and the run's total payout
/// follows from the updated set. Applying the same edit twice yields the
/// same run.
///
/// # Errors
///
/// - [`EngineError::InvalidAmount`] if `value` is negative.
/// - [`EngineError::EmployeeNotInRun`] if no line belongs to `employee_id`.
/// - [`EngineError::InvalidAmount`] if the recomputed figures overflow.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{EditableField, apply_field_edit};
/// use payroll_engine::models::{
///     BranchFilter, PayPeriod, PayrollRun, PayslipLine, ProfileSnapshot, RunStatus,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut line = PayslipLine {
///     employee_id: "emp_001".to_string(),
///     employee_name: "Maria Santos".to_string(),
///     position: "Cashier".to_string(),
///     branch: "Makati".to_string(),
///     days_present: Decimal::from(15),
///     double_pay_amount: Decimal::ZERO,
///     profile_snapshot: ProfileSnapshot {
///         daily_rate: Decimal::from(500),
///         ..ProfileSnapshot::default()
///     },
///     gross_pay: Decimal::ZERO,
///     total_deductions: Decimal::ZERO,
///     net_pay: Decimal::ZERO,
/// };
/// line.recompute().unwrap();
/// let run = PayrollRun {
///     period: PayPeriod::new(
///         NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
///     ).unwrap(),
///     branch_filter: BranchFilter::All,
///     status: RunStatus::Draft,
///     lines: vec![line],
/// };
///
/// let edited = apply_field_edit(&run, "emp_001", EditableField::DaysPresent, Decimal::from(10)).unwrap();
/// assert_eq!(edited.lines[0].gross_pay, Decimal::from(5000));
/// assert_eq!(edited.total_payout().unwrap(), Decimal::from(5000));
/// ```
pub fn apply_field_edit(
    run: &PayrollRun,
    employee_id: &str,
    field: EditableField,
    value: Decimal,
) -> EngineResult<PayrollRun> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidAmount {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }

    let mut updated = run.clone();
    let line = updated
        .line_mut(employee_id)
        .ok_or_else(|| EngineError::EmployeeNotInRun {
            employee_id: employee_id.to_string(),
        })?;

    match field {
        EditableField::DaysPresent => line.days_present = value,
        EditableField::DoublePayAmount => line.double_pay_amount = value,
    }
    line.recompute()?;

    debug!(
        employee_id,
        field = %field,
        value = %value,
        gross_pay = %line.gross_pay,
        net_pay = %line.net_pay,
        "Payslip line recalculated"
    );

    Ok(updated)
}
