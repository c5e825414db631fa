//! Payroll run generation.
//!
//! Batches the payslip calculator over the employees matching a branch
//! filter and returns an in-memory preview. Nothing is persisted here.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::EngineResult;
use crate::models::{BranchFilter, DeductionSelection, PayPeriod, PayrollRun, RunStatus};
use crate::store::CompensationSource;

use super::calculate_payslip;

/// Days present assumed for a semi-monthly period until edited.
pub const DEFAULT_DAYS_PRESENT: u32 = 15;

/// Generation-time defaults applied to every new line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunDefaults {
    /// Initial `days_present` on each line.
    pub days_present: Decimal,
    /// Initial `double_pay_amount` on each line.
    pub double_pay_amount: Decimal,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            days_present: Decimal::from(DEFAULT_DAYS_PRESENT),
            double_pay_amount: Decimal::ZERO,
        }
    }
}

/// Generates a draft payroll run preview.
///
/// Employees are visited in the source's enumeration order, which becomes
/// the run's line order. An employee without a compensation profile, or
/// whose daily rate is zero, still gets a line with all figures at zero.
///
/// # Errors
///
/// Storage faults from the compensation source are returned as-is. A
/// profile whose figures exceed the decimal range yields
/// [`InvalidAmount`](crate::error::EngineError::InvalidAmount).
pub fn generate_run<S>(
    source: &S,
    period: PayPeriod,
    branch_filter: &BranchFilter,
    selection: &DeductionSelection,
    defaults: &RunDefaults,
) -> EngineResult<PayrollRun>
where
    S: CompensationSource + ?Sized,
{
    let employees = source.employees()?;
    let mut lines = Vec::with_capacity(employees.len());
    let mut missing_profiles = 0usize;

    for employee in employees.iter().filter(|e| branch_filter.matches(e)) {
        let profile = source.profile(&employee.id)?;
        if !profile.as_ref().is_some_and(|p| p.is_payable()) {
            missing_profiles += 1;
        }
        lines.push(calculate_payslip(
            employee,
            profile.as_ref(),
            defaults.days_present,
            defaults.double_pay_amount,
            selection,
        )?);
    }

    let run = PayrollRun {
        period,
        branch_filter: branch_filter.clone(),
        status: RunStatus::Draft,
        lines,
    };
    let total_payout = run.total_payout()?;

    info!(
        period_start = %period.start_date,
        period_end = %period.end_date,
        branch = ?branch_filter,
        deductions = selection.len(),
        lines = run.lines.len(),
        missing_profiles,
        total_payout = %total_payout,
        "Payroll run generated"
    );

    Ok(run)
}
