//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod compensation;
mod deduction;
mod employee;
mod money;
mod pay_period;
mod payroll_run;
mod payslip;

pub use compensation::{Allowances, CompensationProfile, Deductions, LoanDeduction, OtherDeduction};
pub use deduction::{DeductionSelection, DeductionType};
pub use employee::{BranchFilter, Employee};
pub use money::{
    MONEY_SCALE, checked_money_sum, coerce_amount, deserialize_lenient_amount, out_of_range,
    round_money,
};
pub use pay_period::{PayPeriod, last_day_of_month};
pub use payroll_run::{PayrollRun, RunStatus, StoredPayrollRun};
pub use payslip::{PayslipLine, ProfileSnapshot};
